use std::path::Path;

use tracing::debug;

use super::reader::ByteReader;
use super::summary::{CompressedPayload, ReplaySummary};
use crate::error::Result;

/// Decode a replay buffer.
///
/// Reads the header fields in file order and captures the compressed input
/// stream as an opaque byte range. The trailing online score id is only read
/// when at least 8 bytes remain. Any read past the end of the buffer fails
/// the whole decode.
pub fn decode(data: &[u8]) -> Result<ReplaySummary> {
    let mut reader = ByteReader::new(data);

    let mode = reader.read_u8()?;
    let version = reader.read_i32()?;
    let beatmap_hash = reader.read_string()?;
    let player_name = reader.read_string()?;
    let replay_hash = reader.read_string()?;
    let count300 = reader.read_u16()?;
    let count100 = reader.read_u16()?;
    let count50 = reader.read_u16()?;
    let count_geki = reader.read_u16()?;
    let count_katu = reader.read_u16()?;
    let count_miss = reader.read_u16()?;
    let score = reader.read_i32()?;
    let max_combo = reader.read_u16()?;
    let perfect_combo = reader.read_u8()? == 1;
    let mods = reader.read_i32()?;
    let lifebar_graph = reader.read_string()?;
    let timestamp = reader.read_u64_halves()?;

    let declared_length = reader.read_i32()?;
    let payload = match usize::try_from(declared_length) {
        Ok(length) if length > 0 => {
            let offset = reader.position();
            let data = reader.read_bytes(length)?.to_vec();
            Some(CompressedPayload {
                offset,
                length,
                data,
            })
        }
        _ => None,
    };

    let online_score_id = if reader.remaining() >= 8 {
        Some(reader.read_u64_halves()?)
    } else {
        None
    };

    let summary = ReplaySummary {
        mode,
        version,
        beatmap_hash,
        player_name,
        replay_hash,
        count300,
        count100,
        count50,
        count_geki,
        count_katu,
        count_miss,
        score,
        max_combo,
        perfect_combo,
        mods,
        lifebar_graph,
        timestamp,
        payload,
        online_score_id,
    };

    debug!(
        "Decoded replay: player={}, mode={}, score={}, payload={} bytes, trailing={} bytes",
        summary.player_name,
        summary.mode,
        summary.score,
        summary.payload_len(),
        reader.remaining()
    );

    Ok(summary)
}

/// Read and decode a replay file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ReplaySummary> {
    let data = std::fs::read(path.as_ref())?;
    decode(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::replay::reader::{STRING_EMPTY, STRING_PRESENT};
    use std::io::Write;

    fn push_string(buf: &mut Vec<u8>, s: &str) {
        if s.is_empty() {
            buf.push(STRING_EMPTY);
        } else {
            assert!(s.len() < 128);
            buf.push(STRING_PRESENT);
            buf.push(s.len() as u8);
            buf.extend_from_slice(s.as_bytes());
        }
    }

    fn push_u64_halves(buf: &mut Vec<u8>, value: u64) {
        buf.extend_from_slice(&(value as u32).to_le_bytes());
        buf.extend_from_slice(&((value >> 32) as u32).to_le_bytes());
    }

    fn sample_replay(payload: &[u8], online_id: Option<u64>) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(0); // mode
        buf.extend_from_slice(&20210520i32.to_le_bytes());
        push_string(&mut buf, "d41d8cd98f00b204e9800998ecf8427e");
        push_string(&mut buf, "player");
        push_string(&mut buf, "");
        for count in [250u16, 12, 3, 40, 5, 2] {
            buf.extend_from_slice(&count.to_le_bytes());
        }
        buf.extend_from_slice(&1_234_567i32.to_le_bytes());
        buf.extend_from_slice(&400u16.to_le_bytes());
        buf.push(0); // perfect
        buf.extend_from_slice(&(8i32 | 16).to_le_bytes());
        push_string(&mut buf, "0|1,1000|0.9");
        push_u64_halves(&mut buf, 637_000_000_000_000_000);
        buf.extend_from_slice(&(payload.len() as i32).to_le_bytes());
        buf.extend_from_slice(payload);
        if let Some(id) = online_id {
            push_u64_halves(&mut buf, id);
        }
        buf
    }

    #[test]
    fn test_decode_full_replay() {
        let data = sample_replay(&[0x5D, 0x00, 0x00, 0x80], Some(4_000_000_001));
        let summary = decode(&data).unwrap();

        assert_eq!(summary.mode, 0);
        assert_eq!(summary.version, 20210520);
        assert_eq!(summary.beatmap_hash, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(summary.player_name, "player");
        assert_eq!(summary.replay_hash, "");
        assert_eq!(summary.count300, 250);
        assert_eq!(summary.count100, 12);
        assert_eq!(summary.count50, 3);
        assert_eq!(summary.count_geki, 40);
        assert_eq!(summary.count_katu, 5);
        assert_eq!(summary.count_miss, 2);
        assert_eq!(summary.score, 1_234_567);
        assert_eq!(summary.max_combo, 400);
        assert!(!summary.perfect_combo);
        assert_eq!(summary.mod_flags().to_string(), "HDHR");
        assert_eq!(summary.lifebar_graph, "0|1,1000|0.9");
        assert_eq!(summary.timestamp, 637_000_000_000_000_000);
        assert_eq!(summary.online_score_id, Some(4_000_000_001));

        let payload = summary.payload.unwrap();
        assert_eq!(payload.length, 4);
        assert_eq!(payload.data, vec![0x5D, 0x00, 0x00, 0x80]);
        assert_eq!(&data[payload.offset..payload.offset + 4], &payload.data[..]);
    }

    #[test]
    fn test_decode_without_online_id() {
        let data = sample_replay(&[1, 2, 3], None);
        let summary = decode(&data).unwrap();
        assert_eq!(summary.online_score_id, None);
        assert_eq!(summary.payload_len(), 3);
    }

    #[test]
    fn test_decode_short_trailer_is_not_an_id() {
        let mut data = sample_replay(&[1, 2, 3], None);
        data.extend_from_slice(&[0xAA; 7]);
        assert_eq!(decode(&data).unwrap().online_score_id, None);
    }

    #[test]
    fn test_decode_empty_payload() {
        let data = sample_replay(&[], Some(7));
        let summary = decode(&data).unwrap();
        assert!(summary.payload.is_none());
        assert_eq!(summary.online_score_id, Some(7));
    }

    #[test]
    fn test_decode_negative_payload_length() {
        let mut data = sample_replay(&[], None);
        let len = data.len();
        data[len - 4..].copy_from_slice(&(-1i32).to_le_bytes());
        let summary = decode(&data).unwrap();
        assert!(summary.payload.is_none());
    }

    #[test]
    fn test_decode_perfect_flag() {
        let mut data = sample_replay(&[], None);
        // mode(1) + version(4) + hash(34) + name(8) + replay hash(1) + counts(12) + score(4) + combo(2)
        let perfect_offset = 1 + 4 + 34 + 8 + 1 + 12 + 4 + 2;
        data[perfect_offset] = 1;
        assert!(decode(&data).unwrap().perfect_combo);
        data[perfect_offset] = 2;
        assert!(!decode(&data).unwrap().perfect_combo);
    }

    #[test]
    fn test_decode_truncated_header() {
        let data = sample_replay(&[], None);
        let err = decode(&data[..20]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_decode_truncated_payload() {
        let data = sample_replay(&[9; 16], None);
        let err = decode(&data[..data.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                needed: 16,
                remaining: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_empty_buffer() {
        assert!(matches!(
            decode(&[]).unwrap_err(),
            Error::UnexpectedEof { offset: 0, .. }
        ));
    }

    #[test]
    fn test_read_file() {
        let data = sample_replay(&[1, 2], Some(99));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let summary = read_file(file.path()).unwrap();
        assert_eq!(summary.player_name, "player");
        assert_eq!(summary.online_score_id, Some(99));

        let missing = read_file(file.path().with_extension("missing")).unwrap_err();
        assert!(missing.is_not_found());
    }
}
