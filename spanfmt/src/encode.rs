// Decimal integer encoder
// Digits are produced tail-first into a fixed stack buffer, two per division.

/// Scratch size; 20 digits plus a sign is the worst case for 64-bit values.
pub const BUFFER_LEN: usize = 32;

const DEC_DIGITS_LUT: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Fixed-capacity scratch space for one encoded integer
pub struct IntBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for IntBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_LEN],
        }
    }

    /// Encode `value`, returning the digits as a view into this buffer
    #[inline]
    pub fn format<I: Integer>(&mut self, value: I) -> &[u8] {
        let start = value.write_tail(&mut self.bytes);
        &self.bytes[start..]
    }
}

/// Encode `value` into `buf` and return the written bytes.
pub fn encode<I: Integer>(value: I, buf: &mut IntBuffer) -> &[u8] {
    buf.format(value)
}

mod private {
    pub trait Sealed {}
}

/// Built-in integer types the encoder accepts
pub trait Integer: Copy + private::Sealed {
    /// Write the decimal form so that it ends at the end of `buf`; returns the
    /// index of the first written byte.
    fn write_tail(self, buf: &mut [u8; BUFFER_LEN]) -> usize;
}

fn write_u64(mut n: u64, buf: &mut [u8; BUFFER_LEN]) -> usize {
    let mut cur = BUFFER_LEN;

    while n >= 100 {
        let d = (n % 100) as usize * 2;
        n /= 100;
        cur -= 2;
        buf[cur..cur + 2].copy_from_slice(&DEC_DIGITS_LUT[d..d + 2]);
    }

    // n < 100: one or two digits left
    if n >= 10 {
        cur -= 1;
        buf[cur] = b'0' + (n % 10) as u8;
        n /= 10;
    }

    cur -= 1;
    buf[cur] = b'0' + n as u8;
    cur
}

fn write_i64(n: i64, buf: &mut [u8; BUFFER_LEN]) -> usize {
    let mut cur = write_u64(n.unsigned_abs(), buf);
    if n < 0 {
        cur -= 1;
        buf[cur] = b'-';
    }
    cur
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl Integer for $t {
            #[inline]
            fn write_tail(self, buf: &mut [u8; BUFFER_LEN]) -> usize {
                write_u64(self as u64, buf)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl Integer for $t {
            #[inline]
            fn write_tail(self, buf: &mut [u8; BUFFER_LEN]) -> usize {
                write_i64(self as i64, buf)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);
