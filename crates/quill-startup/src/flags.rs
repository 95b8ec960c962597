//! Feature flags hydrated from key-value storage before startup.

use quill_core::KvStorage;

pub const FLAG_INLINE_MEDIA_KEY: &str = "flag_inline_media";
pub const FLAG_NEW_COMPOSER_KEY: &str = "flag_new_composer";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Client-side feature toggles persisted across restarts. Unknown or absent
/// values read as disabled.
pub struct FeatureFlags {
    pub inline_media: bool,
    pub new_composer: bool,
}

impl FeatureFlags {
    pub fn hydrate_from_kv(kv: &KvStorage) -> Self {
        Self {
            inline_media: flag_enabled(kv, FLAG_INLINE_MEDIA_KEY),
            new_composer: flag_enabled(kv, FLAG_NEW_COMPOSER_KEY),
        }
    }
}

fn flag_enabled(kv: &KvStorage, key: &str) -> bool {
    matches!(kv.get(key), Some("1") | Some("true") | Some("on"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydrates_enabled_and_disabled_flags() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut kv = KvStorage::open(temp.path().join("kv.json")).expect("open");
        kv.set(FLAG_INLINE_MEDIA_KEY, "true").expect("set");
        kv.set(FLAG_NEW_COMPOSER_KEY, "definitely").expect("set");

        let flags = FeatureFlags::hydrate_from_kv(&kv);
        assert!(flags.inline_media);
        assert!(!flags.new_composer);
    }

    #[test]
    fn empty_store_reads_as_all_disabled() {
        let temp = tempfile::tempdir().expect("tempdir");
        let kv = KvStorage::open(temp.path().join("kv.json")).expect("open");
        assert_eq!(FeatureFlags::hydrate_from_kv(&kv), FeatureFlags::default());
    }
}
