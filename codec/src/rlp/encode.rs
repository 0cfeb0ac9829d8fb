use super::{item::RlpItem, writer::Writer, OFFSET_SHORT_LIST, OFFSET_SHORT_STRING};

const MAX_SHORT_LEN: usize = 55;

/// Streams `item` into `writer`.
///
/// List children go to a child writer first, so the list header can carry their total length.
pub fn encode(item: &RlpItem, writer: &mut Writer) {
    match item {
        RlpItem::ByteString(bytes) => {
            if let [byte] = bytes.as_slice() {
                if *byte < OFFSET_SHORT_STRING {
                    writer.write_byte(*byte);
                    return;
                }
            }
            let (header, n) = header(OFFSET_SHORT_STRING, bytes.len());
            writer.write_bytes(&header[..n]);
            writer.write_bytes(bytes);
        }
        RlpItem::List(items) => {
            let mut scratch = writer.new_child();
            for item in items {
                encode(item, &mut scratch);
            }
            let (header, n) = header(OFFSET_SHORT_LIST, scratch.length());
            writer.write_bytes(&header[..n]);
            writer.append(scratch);
        }
    }
}

/// Single-buffer encoding: sizes are computed up front and every byte is written once.
pub fn encode_to_vec(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(item));
    encode_into(item, &mut out);

    out
}

pub fn encoded_len(item: &RlpItem) -> usize {
    match item {
        RlpItem::ByteString(bytes) if bytes.len() == 1 && bytes[0] < OFFSET_SHORT_STRING => 1,
        _ => {
            let len = payload_len(item);
            header(0, len).1 + len
        }
    }
}

fn payload_len(item: &RlpItem) -> usize {
    match item {
        RlpItem::ByteString(bytes) => bytes.len(),
        RlpItem::List(items) => items.iter().map(encoded_len).sum(),
    }
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::ByteString(bytes) if bytes.len() == 1 && bytes[0] < OFFSET_SHORT_STRING => {
            out.push(bytes[0]);
        }
        RlpItem::ByteString(bytes) => {
            let (header, n) = header(OFFSET_SHORT_STRING, bytes.len());
            out.extend_from_slice(&header[..n]);
            out.extend_from_slice(bytes);
        }
        RlpItem::List(items) => {
            let (header, n) = header(OFFSET_SHORT_LIST, payload_len(item));
            out.extend_from_slice(&header[..n]);
            for item in items {
                encode_into(item, out);
            }
        }
    }
}

/// Length prefix for a payload of `len` bytes, with no leading zero in the long form.
fn header(offset: u8, len: usize) -> ([u8; 9], usize) {
    let mut buf = [0_u8; 9];
    if len <= MAX_SHORT_LEN {
        buf[0] = offset + len as u8;
        return (buf, 1);
    }

    let bytes = len.to_be_bytes();
    let skip = (len.leading_zeros() / 8) as usize;
    let len_bytes = &bytes[skip..];
    buf[0] = offset + MAX_SHORT_LEN as u8 + len_bytes.len() as u8;
    buf[1..=len_bytes.len()].copy_from_slice(len_bytes);

    (buf, 1 + len_bytes.len())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::rlp::{decode::decode_exact, reader::Reader},
        proptest::{collection::vec, prelude::*},
    };

    fn streamed(item: &RlpItem) -> Vec<u8> {
        let mut writer = Writer::new();
        encode(item, &mut writer);
        writer.result()
    }

    fn both(item: &RlpItem) -> Vec<u8> {
        let buffered = encode_to_vec(item);
        assert_eq!(buffered, streamed(item));
        assert_eq!(buffered.len(), encoded_len(item));
        buffered
    }

    fn string(s: &str) -> RlpItem {
        RlpItem::ByteString(s.as_bytes().to_vec())
    }

    #[test]
    fn minimality() {
        assert_eq!(both(&RlpItem::from_u64(1024)), vec![0x82, 0x04, 0x00]);
        assert_eq!(both(&RlpItem::from_u64(0)), vec![0x80]);
        assert_eq!(both(&RlpItem::empty()), vec![0x80]);
        assert_eq!(both(&RlpItem::empty_list()), vec![0xc0]);
        assert_eq!(both(&RlpItem::from_u64(0x7f)), vec![0x7f]);
        assert_eq!(both(&RlpItem::from_u64(0x80)), vec![0x81, 0x80]);
    }

    #[test]
    fn strings_and_lists() {
        assert_eq!(
            hex::encode(both(&RlpItem::List(vec![string("cat"), string("dog")]))),
            "c88363617483646f67"
        );

        let sentence = "Lorem ipsum dolor sit amet, consectetur adipiscing elit!";
        let encoded = both(&string(sentence));
        assert_eq!(&encoded[..2], &[0xb8, 0x38]);
        assert_eq!(&encoded[2..], sentence.as_bytes());

        let fifty_five = RlpItem::ByteString(vec![0xaa; 55]);
        assert_eq!(both(&fifty_five)[0], 0xb7);

        let long = RlpItem::ByteString(vec![0xaa; 1024]);
        assert_eq!(&both(&long)[..3], &[0xb9, 0x04, 0x00]);

        let list = RlpItem::List(vec![RlpItem::ByteString(vec![0x11; 60])]);
        assert_eq!(&both(&list)[..4], &[0xf8, 0x3e, 0xb8, 0x3c]);
    }

    #[test]
    fn child_writer_appended_into_parent() {
        let mut parent = Writer::new();
        parent.write_byte(0x02);
        let mut child = parent.new_child();
        encode(&RlpItem::List(vec![string("cat")]), &mut child);
        parent.append(child);

        assert_eq!(parent.result(), hex::decode("02c483636174").unwrap());
    }

    #[test]
    fn matches_reference_stream() {
        let mut stream = parity_rlp::RlpStream::new_list(3);
        stream.append(&1024_u64);
        stream.append_empty_data();
        stream.begin_list(2);
        stream.append(&"cat");
        stream.append(&vec![0xab_u8; 70]);
        let reference = stream.out().to_vec();

        let item = RlpItem::List(vec![
            RlpItem::from_u64(1024),
            RlpItem::empty(),
            RlpItem::List(vec![string("cat"), RlpItem::ByteString(vec![0xab; 70])]),
        ]);
        assert_eq!(both(&item), reference);
    }

    #[test]
    fn large_payload() {
        let item = RlpItem::List(vec![
            RlpItem::from_u64(1),
            RlpItem::ByteString(vec![0x5a; 50 * 1024 * 1024]),
        ]);
        let encoded = both(&item);
        assert_eq!(&encoded[..2], &[0xfb, 0x03]);

        let mut reader = Reader::new(&encoded);
        assert_eq!(
            crate::rlp::decode::decode_item(&mut reader).unwrap(),
            item
        );
    }

    fn arb_item() -> impl Strategy<Value = RlpItem> {
        let leaf = vec(any::<u8>(), 0..80).prop_map(RlpItem::ByteString);
        leaf.prop_recursive(4, 64, 8, |inner| vec(inner, 0..8).prop_map(RlpItem::List))
    }

    proptest! {
        #[test]
        fn encoders_agree_and_round_trip(item in arb_item()) {
            let encoded = encode_to_vec(&item);
            prop_assert_eq!(&encoded, &streamed(&item));
            prop_assert_eq!(decode_exact(&encoded).unwrap(), item);
        }

        #[test]
        fn matches_reference_bytes(data in vec(any::<u8>(), 0..300)) {
            let reference = parity_rlp::encode(&data).to_vec();
            prop_assert_eq!(encode_to_vec(&RlpItem::ByteString(data)), reference);
        }
    }
}
