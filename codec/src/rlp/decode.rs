use {
    super::{
        item::RlpItem, reader::Reader, OFFSET_LONG_LIST, OFFSET_LONG_STRING, OFFSET_SHORT_LIST,
        OFFSET_SHORT_STRING,
    },
    crate::{config::MAX_RLP_DEPTH, error::MalformedRlp},
    tracing::debug,
};

type Result<T> = std::result::Result<T, MalformedRlp>;

/// Decodes the next item of the stream wrapped in a one-element list.
///
/// An exhausted reader yields the empty list. The reader is left right after the decoded item,
/// so consecutive calls walk through concatenated encodings.
pub fn decode(reader: &mut Reader) -> Result<RlpItem> {
    if reader.is_empty() {
        return Ok(RlpItem::empty_list());
    }
    let item = decode_item(reader)?;

    Ok(RlpItem::List(vec![item]))
}

/// Decodes exactly one item from the current position.
pub fn decode_item(reader: &mut Reader) -> Result<RlpItem> {
    if reader.is_empty() {
        return Err(MalformedRlp::EmptyInput);
    }
    let start = reader.consumed();

    decode_at(reader, 0).map_err(|e| {
        debug!(target: "rlp", start, consumed = reader.consumed(), "RLP item rejected: {}", e);
        e
    })
}

/// Decodes `bytes` as a single item and rejects anything left over.
pub fn decode_exact(bytes: &[u8]) -> Result<RlpItem> {
    let mut reader = Reader::new(bytes);
    let item = decode_item(&mut reader)?;
    if !reader.is_empty() {
        return Err(MalformedRlp::TrailingBytes(reader.remaining()));
    }

    Ok(item)
}

fn decode_at(reader: &mut Reader, depth: usize) -> Result<RlpItem> {
    if depth > MAX_RLP_DEPTH {
        return Err(MalformedRlp::DepthExceeded);
    }

    let prefix = reader.read_byte()?;
    let item = match prefix {
        0x00..=0x7f => RlpItem::ByteString(vec![prefix]),
        OFFSET_SHORT_STRING => RlpItem::empty(),
        0x81..=OFFSET_LONG_STRING => {
            let len = (prefix - OFFSET_SHORT_STRING) as usize;
            let bytes = read_payload(reader, len)?;
            if len == 1 && bytes[0] < OFFSET_SHORT_STRING {
                return Err(MalformedRlp::NonCanonical("single byte below 0x80 has a header"));
            }
            RlpItem::ByteString(bytes.to_vec())
        }
        0xb8..=0xbf => {
            let len = read_length(reader, prefix - OFFSET_LONG_STRING)?;
            if len <= 55 {
                return Err(MalformedRlp::NonCanonical("long string header for a short string"));
            }
            RlpItem::ByteString(read_payload(reader, len)?.to_vec())
        }
        OFFSET_SHORT_LIST..=OFFSET_LONG_LIST => {
            let len = (prefix - OFFSET_SHORT_LIST) as usize;
            decode_list(reader, len, depth)?
        }
        0xf8..=0xff => {
            let len = read_length(reader, prefix - OFFSET_LONG_LIST)?;
            if len <= 55 {
                return Err(MalformedRlp::NonCanonical("long list header for a short list"));
            }
            decode_list(reader, len, depth)?
        }
    };

    Ok(item)
}

/// Payload reads are checked against what the reader still holds before anything is allocated.
fn read_payload<'a>(reader: &mut Reader<'a>, len: usize) -> Result<&'a [u8]> {
    let remaining = reader.remaining();
    if len > remaining {
        return Err(MalformedRlp::LengthMismatch {
            declared: len,
            remaining,
        });
    }

    Ok(reader.read_bytes(len)?)
}

fn read_length(reader: &mut Reader, len_of_len: u8) -> Result<usize> {
    let bytes = reader.read_bytes(len_of_len as usize)?;
    if bytes[0] == 0 {
        return Err(MalformedRlp::NonCanonical("length has a leading zero byte"));
    }
    if bytes.len() > std::mem::size_of::<usize>() {
        return Err(MalformedRlp::LengthOverflow);
    }

    Ok(bytes.iter().fold(0_usize, |acc, b| acc << 8 | *b as usize))
}

fn decode_list(reader: &mut Reader, len: usize, depth: usize) -> Result<RlpItem> {
    let payload = read_payload(reader, len)?;

    // items of this level may not reach past `len`
    let mut level = Reader::new(payload);
    let mut items = Vec::new();
    while level.consumed() < len {
        items.push(decode_at(&mut level, depth + 1)?);
    }

    Ok(RlpItem::List(items))
}
