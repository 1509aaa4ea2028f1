/// Mindfulness activity types (served by the REST API)
use serde::{Deserialize, Serialize};

/// Activity identifier
pub type ActivityId = i64;

/// A mindfulness activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Row identifier
    pub id: ActivityId,
    /// Activity name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Mood associated with the activity
    pub mood: Option<String>,
}

/// Fields accepted when creating or replacing an activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    /// Activity name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Mood associated with the activity
    #[serde(default)]
    pub mood: Option<String>,
}
