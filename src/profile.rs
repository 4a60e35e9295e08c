//! Typed user and verification records.
//!
//! Both records arrive as JSON from external storage and are decoded
//! leniently: anything that cannot be understood falls back to a default
//! that grants nothing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status code for a document the backend has confirmed.
pub const VERIFIED: i64 = 1;

/// Status code assumed for documents with no recorded status.
pub const UNVERIFIED: i64 = 0;

/// Category of rider/driver account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Enrolled student; must verify a student ID
    Student,
    /// Working professional; must verify a work ID
    Professional,
    /// Any other or unrecognized account type
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Student => write!(f, "student"),
            UserType::Professional => write!(f, "professional"),
            UserType::Other => write!(f, "other"),
        }
    }
}

/// Cached user profile.
///
/// Only `user_type` is interpreted; every other field is carried opaquely.
///
/// ```
/// use ride_guard::{UserProfile, UserType};
///
/// let user = UserProfile::from_json(r#"{"user_type":"student","name":"Sam"}"#).unwrap();
/// assert_eq!(user.user_type, UserType::Student);
/// assert_eq!(user.extra["name"], "Sam");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account category
    #[serde(default)]
    pub user_type: UserType,
    /// Remaining profile fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Creates a profile with no extra fields.
    pub fn new(user_type: UserType) -> Self {
        Self {
            user_type,
            extra: Map::new(),
        }
    }

    /// Decodes a stored profile, returning `None` if it is not a valid profile object.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// A verification document tracked by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    /// Front of government ID
    IdFront,
    /// Back of government ID
    IdBack,
    /// Selfie matched against the ID
    Selfie,
    /// Student ID card
    StudentId,
    /// Employer ID card
    WorkId,
    /// Front of driver's license
    LicenseFront,
    /// Back of driver's license
    LicenseBack,
}

impl DocumentKind {
    /// Every tracked document.
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::IdFront,
        DocumentKind::IdBack,
        DocumentKind::Selfie,
        DocumentKind::StudentId,
        DocumentKind::WorkId,
        DocumentKind::LicenseFront,
        DocumentKind::LicenseBack,
    ];

    /// Documents needed to offer a ride.
    pub const LICENSE: [DocumentKind; 2] = [DocumentKind::LicenseFront, DocumentKind::LicenseBack];

    /// The key this document uses in the stored verification record.
    pub fn key(self) -> &'static str {
        match self {
            DocumentKind::IdFront => "id_front",
            DocumentKind::IdBack => "id_back",
            DocumentKind::Selfie => "selfie",
            DocumentKind::StudentId => "student_id",
            DocumentKind::WorkId => "work_id",
            DocumentKind::LicenseFront => "license_front",
            DocumentKind::LicenseBack => "license_back",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Documents that must be verified before using any gated screen.
///
/// The base set is ID front, ID back and selfie. Students add a student ID,
/// professionals add a work ID. An absent profile gets the base set.
///
/// The driver's license is deliberately not part of this set; it is only
/// checked when offering a ride.
pub fn required_documents(user_type: Option<UserType>) -> Vec<DocumentKind> {
    let mut docs = vec![DocumentKind::IdFront, DocumentKind::IdBack, DocumentKind::Selfie];
    match user_type {
        Some(UserType::Student) => docs.push(DocumentKind::StudentId),
        Some(UserType::Professional) => docs.push(DocumentKind::WorkId),
        Some(UserType::Other) | None => {}
    }
    docs
}

/// Per-document verification status codes.
///
/// Keys are document keys such as `id_front`. A missing key reads as
/// [`UNVERIFIED`].
///
/// ```
/// use ride_guard::{DocumentKind, VerificationRecord};
///
/// let record = VerificationRecord::from_json(r#"{"id_front":1,"id_back":2}"#);
/// assert!(record.is_verified(DocumentKind::IdFront));
/// assert!(!record.is_verified(DocumentKind::IdBack));
/// assert_eq!(record.status(DocumentKind::Selfie), 0);
///
/// assert!(VerificationRecord::from_json("not json").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerificationRecord {
    statuses: BTreeMap<String, i64>,
}

impl VerificationRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a stored record.
    ///
    /// Anything other than a JSON object yields an empty record. Within an
    /// object, entries whose value is not an integer are dropped and so read
    /// as unverified.
    pub fn from_json(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::new();
        };

        let statuses = map
            .into_iter()
            .filter_map(|(key, value)| status_code(&value).map(|code| (key, code)))
            .collect();

        Self { statuses }
    }

    /// Sets the status for a document, returning the updated record.
    pub fn with(mut self, kind: DocumentKind, status: i64) -> Self {
        self.statuses.insert(kind.key().to_string(), status);
        self
    }

    /// Returns the status code for a document, defaulting to [`UNVERIFIED`].
    pub fn status(&self, kind: DocumentKind) -> i64 {
        self.statuses.get(kind.key()).copied().unwrap_or(UNVERIFIED)
    }

    /// Returns true if the document's status is exactly [`VERIFIED`].
    pub fn is_verified(&self, kind: DocumentKind) -> bool {
        self.status(kind) == VERIFIED
    }

    /// Returns the documents from `required` that are not verified, in order.
    pub fn missing(&self, required: &[DocumentKind]) -> Vec<DocumentKind> {
        required
            .iter()
            .copied()
            .filter(|kind| !self.is_verified(*kind))
            .collect()
    }

    /// Returns true if no status has been recorded.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Serializes the record back to its stored JSON form.
    pub fn to_json(&self) -> String {
        let map: Map<String, Value> = self
            .statuses
            .iter()
            .map(|(key, code)| (key.clone(), Value::from(*code)))
            .collect();
        Value::Object(map).to_string()
    }
}

impl FromIterator<(DocumentKind, i64)> for VerificationRecord {
    fn from_iter<I: IntoIterator<Item = (DocumentKind, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |record, (kind, status)| record.with(kind, status))
    }
}

fn status_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}
