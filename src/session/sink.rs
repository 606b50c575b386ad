// Ordered buffer of binary audio chunks for one recording
//
// Chunks are kept exactly as they arrived from the browser's recorder
// (typically Opus-in-WebM fragments). They are only meaningful as a whole,
// so nothing here inspects or decodes them; `assemble` joins them back into
// the single container stream the recorder produced.

/// Result of assembling a recording's buffered audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// Nothing was buffered; the transcription service must not be called
    Empty,
    /// Contiguous audio blob, chunks concatenated in arrival order
    Audio(Vec<u8>),
}

impl Assembled {
    pub fn len(&self) -> usize {
        match self {
            Assembled::Empty => 0,
            Assembled::Audio(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only chunk buffer
#[derive(Debug, Default)]
pub struct ChunkSink {
    chunks: Vec<Vec<u8>>,
    total_bytes: usize,
}

impl ChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk at the end of the buffer
    pub fn push(&mut self, chunk: Vec<u8>) {
        self.total_bytes += chunk.len();
        self.chunks.push(chunk);
    }

    /// Number of chunks buffered
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total number of bytes buffered across all chunks
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate all chunks in arrival order
    ///
    /// Zero-length chunks contribute nothing, so a buffer holding only empty
    /// frames assembles to `Assembled::Empty` just like an untouched one.
    pub fn assemble(&self) -> Assembled {
        if self.total_bytes == 0 {
            return Assembled::Empty;
        }

        let mut blob = Vec::with_capacity(self.total_bytes);
        for chunk in &self.chunks {
            blob.extend_from_slice(chunk);
        }

        Assembled::Audio(blob)
    }

    /// Assemble and release the buffered chunks in one step
    pub fn drain(&mut self) -> Assembled {
        let assembled = self.assemble();
        self.clear();
        assembled
    }

    /// Drop every buffered chunk and free the memory
    pub fn clear(&mut self) {
        self.chunks = Vec::new();
        self.total_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sink_assembles_to_empty() {
        let sink = ChunkSink::new();
        assert_eq!(sink.assemble(), Assembled::Empty);
        assert!(sink.assemble().is_empty());
    }

    #[test]
    fn test_assemble_preserves_arrival_order() {
        let mut sink = ChunkSink::new();
        sink.push(vec![1, 2, 3]);
        sink.push(vec![4]);
        sink.push(vec![5, 6]);

        assert_eq!(sink.chunk_count(), 3);
        assert_eq!(sink.total_bytes(), 6);
        assert_eq!(sink.assemble(), Assembled::Audio(vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_only_empty_chunks_assemble_to_empty() {
        let mut sink = ChunkSink::new();
        sink.push(Vec::new());
        sink.push(Vec::new());

        assert_eq!(sink.chunk_count(), 2);
        assert_eq!(sink.assemble(), Assembled::Empty);
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut sink = ChunkSink::new();
        sink.push(vec![9; 10]);

        let assembled = sink.drain();
        assert_eq!(assembled.len(), 10);
        assert!(sink.is_empty());
        assert_eq!(sink.total_bytes(), 0);
        assert_eq!(sink.drain(), Assembled::Empty);
    }
}
