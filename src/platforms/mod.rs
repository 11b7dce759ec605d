// Platform adapters — one module per source network.
//
// Every module follows the same contract: serde types for the platform's
// wire shape, a single-method capability trait for the externally
// authenticated client, and a `collect` function that normalizes one
// response page into a Grouping. An absent client downgrades to an empty
// grouping with a diagnostic; every other failure propagates.

use serde::{Deserialize, Deserializer};

pub mod bilibili;
#[cfg(feature = "telegram")]
pub mod telegram;
pub mod tiktok;
pub mod x;
pub mod xiaohongshu;
pub mod youtube;

/// Accept either a JSON string or an integer and coerce to String —
/// platform APIs disagree on whether ids are numeric.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
