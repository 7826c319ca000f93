use crate::constants::{HISTOGRAM_METADATA_WORDS, HISTOGRAM_SENTINEL, HISTOGRAM_TICK_SECONDS};
use crate::error::{Error, Result};
use log::debug;

/// A decoded histogram capture: the bin counts plus the trailing metadata
/// record appended by the FPGA.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramBlock {
    pub bins: Vec<u16>,
    /// Seconds.
    pub dead_time: f64,
    /// Seconds.
    pub time_measured: f64,
    pub num_events: u32,
    pub idle_time: u16,
    raw_len: usize,
}

impl HistogramBlock {
    /// Decodes an assembled bulk stream.
    ///
    /// The stream is read as native-order 16-bit words. Every sentinel word is
    /// dropped before the metadata record is sliced off the end, so a metadata
    /// word that happens to equal the sentinel shifts the record.
    pub fn decode(stream: &[u8]) -> Result<Self> {
        if stream.len() % 2 != 0 {
            return Err(Error::MalformedHistogram("odd byte count"));
        }

        let words: Vec<u16> = stream
            .chunks_exact(2)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
            .filter(|word| *word != HISTOGRAM_SENTINEL)
            .collect();

        debug!(
            "histogram stream: {} bytes, {} words after sentinel removal",
            stream.len(),
            words.len()
        );

        if words.is_empty() {
            return Ok(Self {
                raw_len: stream.len(),
                ..Self::default()
            });
        }

        if words.len() < HISTOGRAM_METADATA_WORDS {
            return Err(Error::MalformedHistogram("stream ends before metadata record"));
        }

        let (bins, meta) = words.split_at(words.len() - HISTOGRAM_METADATA_WORDS);

        Ok(Self {
            bins: bins.to_vec(),
            dead_time: ticks(meta[0], meta[1], meta[2]) as f64 * HISTOGRAM_TICK_SECONDS,
            time_measured: ticks(meta[3], meta[4], meta[5]) as f64 * HISTOGRAM_TICK_SECONDS,
            num_events: u32::from(meta[6]) + (u32::from(meta[7]) << 16),
            idle_time: meta[8],
            raw_len: stream.len(),
        })
    }

    /// Byte length of the stream this block was decoded from, sentinels included.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn total_counts(&self) -> u64 {
        self.bins.iter().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

fn ticks(low: u16, mid: u16, high: u16) -> u64 {
    u64::from(low) + (u64::from(mid) << 16) + (u64::from(high) << 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_ne_bytes()).collect()
    }

    const META: [u16; 9] = [0x0010, 0x0002, 0x0001, 0x4000, 0x0000, 0x0003, 0x2345, 0x0001, 0x0077];

    #[test]
    fn splits_bins_from_metadata() {
        let mut words = vec![1, 2, HISTOGRAM_SENTINEL, 3, 4, 5];
        words.extend_from_slice(&META);

        let block = HistogramBlock::decode(&stream(&words)).unwrap();

        assert_eq!(block.bins, vec![1, 2, 3, 4, 5]);
        let dead = (0x0010u64 + (0x0002u64 << 16) + (0x0001u64 << 32)) as f64 * 10e-8;
        let measured = (0x4000u64 + (0x0003u64 << 32)) as f64 * 10e-8;
        assert_eq!(block.dead_time, dead);
        assert_eq!(block.time_measured, measured);
        assert_eq!(block.num_events, 0x0001_2345);
        assert_eq!(block.idle_time, 0x0077);
        assert_eq!(block.raw_len(), words.len() * 2);
        assert_eq!(block.total_counts(), 15);
    }

    #[test]
    fn sentinels_anywhere_are_dropped() {
        let mut words = vec![HISTOGRAM_SENTINEL, 9, HISTOGRAM_SENTINEL, HISTOGRAM_SENTINEL];
        words.extend_from_slice(&META[..4]);
        words.push(HISTOGRAM_SENTINEL);
        words.extend_from_slice(&META[4..]);
        words.push(HISTOGRAM_SENTINEL);

        let block = HistogramBlock::decode(&stream(&words)).unwrap();

        assert_eq!(block.bins, vec![9]);
        assert_eq!(block.idle_time, 0x0077);
        assert_eq!(block.num_events, 0x0001_2345);
    }

    #[test]
    fn sentinel_valued_metadata_shifts_record() {
        // idle_time of 0x8000 is indistinguishable from padding
        let mut words = vec![7, 8];
        words.extend_from_slice(&META[..8]);
        words.push(HISTOGRAM_SENTINEL);

        let block = HistogramBlock::decode(&stream(&words)).unwrap();

        assert_eq!(block.bins, vec![7]);
        assert_eq!(block.idle_time, META[7]);
    }

    #[test]
    fn metadata_only_stream_has_no_bins() {
        let block = HistogramBlock::decode(&stream(&META)).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.idle_time, 0x0077);
    }

    #[test]
    fn odd_length_is_malformed() {
        let mut bytes = stream(&META);
        bytes.push(0);
        assert!(matches!(
            HistogramBlock::decode(&bytes),
            Err(Error::MalformedHistogram(_))
        ));
    }

    #[test]
    fn empty_stream_is_an_empty_block() {
        let block = HistogramBlock::decode(&[]).unwrap();
        assert_eq!(block, HistogramBlock::default());
    }

    #[test]
    fn padding_only_stream_is_an_empty_block() {
        let block = HistogramBlock::decode(&stream(&[HISTOGRAM_SENTINEL; 4])).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.num_events, 0);
        assert_eq!(block.raw_len(), 8);
    }

    #[test]
    fn truncated_metadata_is_malformed() {
        assert!(matches!(
            HistogramBlock::decode(&stream(&META[..8])),
            Err(Error::MalformedHistogram(_))
        ));
    }
}
