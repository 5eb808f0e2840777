//! Lock-free ring buffer between the decoder and the output callback

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Audio ring buffer, split into producer and consumer ends before use
pub struct AudioRingBuffer {
    producer: HeapProducer<f32>,
    consumer: HeapConsumer<f32>,
}

impl AudioRingBuffer {
    /// Create new ring buffer with given capacity
    ///
    /// # Arguments
    /// * `capacity` - Buffer capacity in samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<f32>::new(capacity.max(1));
        let (producer, consumer) = rb.split();

        Self { producer, consumer }
    }

    /// Ring buffer pre-filled with a whole clip
    ///
    /// Returns only the consumer end; nothing else is ever written.
    pub fn with_clip(samples: &[f32]) -> AudioConsumer {
        let (mut producer, consumer) = Self::new(samples.len()).split();
        producer.write(samples);
        consumer
    }

    /// Split into producer and consumer ends
    pub fn split(self) -> (AudioProducer, AudioConsumer) {
        (
            AudioProducer {
                producer: self.producer,
            },
            AudioConsumer {
                consumer: self.consumer,
            },
        )
    }
}

/// Producer end of audio ring buffer (for writing)
pub struct AudioProducer {
    producer: HeapProducer<f32>,
}

impl AudioProducer {
    /// Write samples to buffer
    ///
    /// # Returns
    /// Number of samples actually written (may be less if buffer is full)
    pub fn write(&mut self, samples: &[f32]) -> usize {
        self.producer.push_slice(samples)
    }
}

/// Consumer end of audio ring buffer (for reading)
pub struct AudioConsumer {
    consumer: HeapConsumer<f32>,
}

impl AudioConsumer {
    /// Fill `out` from the buffer, padding with silence once drained
    ///
    /// # Returns
    /// Number of samples actually read
    pub fn read_or_silence(&mut self, out: &mut [f32]) -> usize {
        let read = self.consumer.pop_slice(out);
        out[read..].fill(0.0);
        read
    }

    /// Get number of available samples
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_write_read() {
        let rb = AudioRingBuffer::new(1024);
        let (mut producer, mut consumer) = rb.split();

        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(producer.write(&data), 5);

        let mut output = vec![0.0; 5];
        assert_eq!(consumer.read_or_silence(&mut output), 5);
        assert_eq!(output, data);
    }

    #[test]
    fn test_ring_buffer_overflow() {
        let rb = AudioRingBuffer::new(10);
        let (mut producer, consumer) = rb.split();

        let written = producer.write(&[1.0; 20]);

        assert_eq!(written, 10);
        assert_eq!(consumer.len(), 10);
    }

    #[test]
    fn test_clip_drains_into_silence() {
        let mut consumer = AudioRingBuffer::with_clip(&[0.5, -0.5, 0.25]);
        assert_eq!(consumer.len(), 3);

        let mut output = vec![9.0; 5];
        let read = consumer.read_or_silence(&mut output);

        assert_eq!(read, 3);
        assert_eq!(output, vec![0.5, -0.5, 0.25, 0.0, 0.0]);
        assert!(consumer.is_empty());
    }
}
