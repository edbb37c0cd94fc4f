//! Identify audio CDs by their CDDB disc id and look them up on CDDB/freedb compatible
//! servers over the CDDBP socket protocol or its HTTP variant.

pub mod cddb;
pub mod fingerprint;
pub mod toc;
mod util;

#[cfg(test)]
mod test_util;
