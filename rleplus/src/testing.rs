//! Fixtures for building RLE+ buffers in tests.

/// Bit-level writer producing LSB-first streams the decoder can read.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Appends the low `n` bits of `value`, least significant bit first.
    pub fn push_bits(&mut self, value: u64, n: u32) {
        for i in 0..n {
            let offset = self.bit_len % 8;
            if offset == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 == 1 {
                if let Some(last) = self.bytes.last_mut() {
                    *last |= 1 << offset;
                }
            }
            self.bit_len += 1;
        }
    }

    /// Writes the version and initial state flag.
    pub fn header(&mut self, version: u8, first: bool) {
        self.push_bits(version as u64, 2);
        self.push_bits(first as u64, 1);
    }

    /// Writes a run of length 1 using the single bit form.
    pub fn short_run(&mut self) {
        self.push_bits(1, 1);
    }

    /// Writes a run of length 0 to 15 using the literal form.
    pub fn literal_run(&mut self, len: u8) {
        assert!(len < 16, "literal runs hold at most 15");
        self.push_bits(0, 1);
        self.push_bits(1, 1);
        self.push_bits(len as u64, 4);
    }

    /// Writes a run of any length using the variable-length form.
    pub fn varint_run(&mut self, mut len: u64) {
        self.push_bits(0, 2);
        loop {
            let mut byte = len & 0x7F;
            len >>= 7;
            if len != 0 {
                byte |= 0x80;
            }
            self.push_bits(byte, 8);
            if len == 0 {
                break;
            }
        }
    }

    /// Writes a run using the shortest form for its length.
    pub fn run(&mut self, len: u64) {
        match len {
            1 => self.short_run(),
            0 | 2..=15 => self.literal_run(len as u8),
            _ => self.varint_run(len),
        }
    }

    /// Returns the written bytes, zero padded to a byte boundary.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes a version 0 program from its initial state and run lengths.
pub fn encode_runs(first: bool, runs: &[u64]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.header(crate::SUPPORTED_VERSION, first);
    for &run in runs {
        writer.run(run);
    }
    writer.finish()
}

/// Converts strictly increasing values into `(first, runs)`.
pub fn runs_from_sorted(values: &[u64]) -> (bool, Vec<u64>) {
    let first = values.first() == Some(&0);
    let mut runs = Vec::new();
    let mut position = 0;
    let mut index = 0;

    while index < values.len() {
        let start = values[index];
        if start > position {
            runs.push(start - position);
        }

        let mut end = start;
        index += 1;
        while index < values.len() && values[index] == end + 1 {
            end += 1;
            index += 1;
        }

        runs.push(end - start + 1);
        position = end + 1;
    }

    (first, runs)
}

/// Encodes strictly increasing values as a version 0 RLE+ buffer.
pub fn encode_set(values: &[u64]) -> Vec<u8> {
    let (first, runs) = runs_from_sorted(values);
    encode_runs(first, &runs)
}
