//! Value shapes: copied by assignment, never traversed.

use crate::{Replicate, Shape};
use std::any::type_name;
use std::borrow::Cow;
use std::marker::PhantomData;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::{NonZeroI32, NonZeroI64, NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

macro_rules! value_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Replicate for $ty {
                fn shape() -> Shape {
                    Shape::value(type_name::<Self>())
                }

                #[inline]
                fn replicate(&self) -> Self {
                    ::core::clone::Clone::clone(self)
                }
            }
        )*
    };
}

value_shape!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    NonZeroI32,
    NonZeroI64,
    NonZeroU32,
    NonZeroU64,
    NonZeroUsize,
    String,
    &'static str,
    Cow<'static, str>,
    PathBuf,
    Duration,
    Instant,
    SystemTime,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    std::cmp::Ordering,
);

impl<T: 'static> Replicate for PhantomData<T> {
    fn shape() -> Shape {
        Shape::value(type_name::<Self>())
    }

    #[inline]
    fn replicate(&self) -> Self {
        PhantomData
    }
}

#[cfg(feature = "uuid")]
value_shape!(uuid::Uuid);

#[cfg(feature = "chrono")]
value_shape!(
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::Utc,
    chrono::FixedOffset,
);

#[cfg(feature = "chrono")]
impl<Tz> Replicate for chrono::DateTime<Tz>
where
    Tz: chrono::TimeZone + 'static,
{
    fn shape() -> Shape {
        Shape::value(type_name::<Self>())
    }

    #[inline]
    fn replicate(&self) -> Self {
        self.clone()
    }
}
