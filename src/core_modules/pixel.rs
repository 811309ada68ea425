// THEORY:
// The `Pixel` module is the smallest unit of data in the comparison engine.
// It is a "dumb" data container: four unsigned 8-bit channels in a fixed
// red, green, blue, alpha order, with no premultiplication assumed or
// altered. All analytical work (differencing, aggregation) lives in the
// comparator layer; a `Pixel` only knows how to be built from raw bytes
// and how to compare itself for exact equality.
//
// Whole-tuple equality is deliberate: the engine counts a pixel as
// "different" when any one of its four channels differs, so `Pixel`
// derives `Eq` and the comparator needs nothing beyond `!=`.

pub mod pixel {
    type Byte = u8;
    type Bytes = Vec<Byte>;
    pub type Channel = Byte;

    /// Number of channels in a pixel (red, green, blue, alpha).
    pub const CHANNELS: usize = 4;

    /// A single RGBA pixel. Channel order is fixed; values are raw 8-bit
    /// samples straight from the buffer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// The channels in their fixed buffer order, handy for per-channel
        /// accumulation loops.
        pub fn channels(&self) -> [Channel; CHANNELS] {
            [self.red, self.green, self.blue, self.alpha]
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }
}
