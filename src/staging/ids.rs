//! Identifier generation
//!
//! External ids look like `area_1718000000000_k3j9x0a1b2c`: a kind prefix,
//! the creation time in unix milliseconds and a random lowercase base36
//! suffix. Document-internal ids (`_id`) are 24 hex characters.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 11;

/// Kinds of externally visible ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Area,
    Hotspot,
    Info,
    Item,
    Instance,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Hotspot => "hotspot",
            Self::Info => "info",
            Self::Item => "item",
            Self::Instance => "inst",
        }
    }
}

/// `<prefix>_<unixMillis>_<base36>`
pub fn new_id(kind: IdKind) -> String {
    format!(
        "{}_{}_{}",
        kind.prefix(),
        Utc::now().timestamp_millis(),
        random_base36(SUFFIX_LEN)
    )
}

pub fn document_id() -> String {
    let mut rng = rand::thread_rng();
    format!("{:016x}{:08x}", rng.gen::<u64>(), rng.gen::<u32>())
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Check that `id` has the `<prefix>_<millis>_<base36>` shape for `kind`
pub fn is_well_formed(kind: IdKind, id: &str) -> bool {
    let mut parts = id.splitn(3, '_');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    prefix == kind.prefix()
        && !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_well_formed() {
        for kind in [IdKind::Area, IdKind::Hotspot, IdKind::Info, IdKind::Item, IdKind::Instance] {
            let id = new_id(kind);
            assert!(is_well_formed(kind, &id), "{} is malformed", id);
            assert!(id.starts_with(&format!("{}_", kind.prefix())));
        }
    }

    #[test]
    fn test_suffix_length() {
        let id = new_id(IdKind::Item);
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
    }

    #[test]
    fn test_rejects_other_kinds_and_shapes() {
        assert!(!is_well_formed(IdKind::Area, "hotspot_1_abc"));
        assert!(!is_well_formed(IdKind::Area, "area_12x_abc"));
        assert!(!is_well_formed(IdKind::Area, "area_12_ABC"));
        assert!(!is_well_formed(IdKind::Area, "area_12"));
    }

    #[test]
    fn test_document_ids_are_hex() {
        let id = document_id();
        assert_eq!(id.len(), 24);
        assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(id, document_id());
    }
}
