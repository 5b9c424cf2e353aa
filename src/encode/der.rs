use crate::error::DrsaError;
use num_bigint::BigUint;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

// 短格式: 0..=127; 长格式: 0x80 | 长度字节数, 后跟大端序的长度
fn encode_len(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
}

fn decode_len(data: &[u8]) -> Result<(usize, &[u8]), DrsaError> {
    let (&first, rest) = data
        .split_first()
        .ok_or_else(|| DrsaError::InvalidDer("missing length".to_string()))?;

    if first < 0x80 {
        return Ok((first as usize, rest));
    }

    let cnt = (first & 0x7f) as usize;
    if cnt == 0 || cnt > std::mem::size_of::<usize>() || cnt > rest.len() {
        return Err(DrsaError::InvalidDer(format!("invalid long form length {first:#x}")));
    }

    let len = rest[..cnt]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((len, &rest[cnt..]))
}

fn encode_integer(x: &BigUint, out: &mut Vec<u8>) {
    // 无符号的最小大端序表示, 不添加符号字节
    let bytes = x.to_bytes_be();
    out.push(INTEGER_TAG);
    encode_len(bytes.len(), out);
    out.extend_from_slice(&bytes);
}

fn decode_tlv(tag: u8, data: &[u8]) -> Result<(&[u8], &[u8]), DrsaError> {
    match data.split_first() {
        Some((&t, rest)) if t == tag => {
            let (len, rest) = decode_len(rest)?;
            if len > rest.len() {
                return Err(DrsaError::InvalidDer(format!(
                    "the value length `{len}` great than the remaining `{}` bytes",
                    rest.len()
                )));
            }
            Ok(rest.split_at(len))
        }
        Some((&t, _)) => Err(DrsaError::InvalidDer(format!(
            "expect tag {tag:#04x}, but got {t:#04x}"
        ))),
        None => Err(DrsaError::InvalidDer("empty data".to_string())),
    }
}

/// `SEQUENCE { INTEGER, ... }`
pub fn encode_sequence(fields: &[&BigUint]) -> Vec<u8> {
    let mut body = Vec::new();
    for x in fields {
        encode_integer(x, &mut body);
    }

    let mut out = Vec::with_capacity(body.len() + 6);
    out.push(SEQUENCE_TAG);
    encode_len(body.len(), &mut out);
    out.append(&mut body);
    out
}

pub fn decode_sequence(data: &[u8]) -> Result<Vec<BigUint>, DrsaError> {
    let (mut body, rest) = decode_tlv(SEQUENCE_TAG, data)?;
    if !rest.is_empty() {
        return Err(DrsaError::InvalidDer(format!(
            "`{}` trailing bytes after the sequence",
            rest.len()
        )));
    }

    let mut fields = Vec::new();
    while !body.is_empty() {
        let (x, rest) = decode_tlv(INTEGER_TAG, body)?;
        fields.push(BigUint::from_bytes_be(x));
        body = rest;
    }

    Ok(fields)
}
