use serde::{Deserialize, Deserializer, Serialize};

/// A structured resume snapshot.
///
/// tailorfix tries hard to be *tolerant* when reading resumes:
/// - Unknown fields are ignored.
/// - Absent and `null` sequences both read as empty.
///
/// The upstream parser should enforce stricter schema compliance; tailorfix's
/// job is to be useful with resumes "as found".
///
/// Sequence order is display order. Skills may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceEntry>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<ProjectEntry>,
}

/// One experience entry: an optional header plus ordered detail bullets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: Vec<String>,
}

/// One project entry: an optional name, description bullets, and tech tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub tech: Vec<String>,
}

/// JSON `null` reads as the empty sequence.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
