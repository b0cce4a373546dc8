use chrono::{DateTime, Utc};

/// What a capture produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Photo,
    Video,
}

impl CaptureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

/// Media container of a capture blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaContainer {
    Jpeg,
    Mp4,
    WebM,
}

impl MediaContainer {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Mp4 => "mp4",
            Self::WebM => "webm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Mp4 => "video/mp4",
            Self::WebM => "video/webm",
        }
    }
}

/// An encoded media payload plus its mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl MediaBlob {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One completed photo or video capture, handed to the gallery collaborator.
///
/// Immutable once created; the gallery owns it after hand-off. `sequence`
/// increases monotonically per controller so captures taken within the
/// same wall-clock second stay ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureItem {
    pub id: String,
    pub kind: CaptureKind,
    pub blob: MediaBlob,
    pub container: MediaContainer,
    /// Container the media was originally recorded in, before any
    /// best-effort re-encode.
    pub source_container: MediaContainer,
    pub created_at: DateTime<Utc>,
    pub sequence: u64,
}

impl CaptureItem {
    pub fn new(
        kind: CaptureKind,
        blob: MediaBlob,
        container: MediaContainer,
        source_container: MediaContainer,
        sequence: u64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            blob,
            container,
            source_container,
            created_at: Utc::now(),
            sequence,
        }
    }

    /// `<prefix>_<kind>_<YYYY-MM-DD>_<HH-MM-SS>.<ext>`
    pub fn file_name(&self, prefix: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            prefix,
            self.kind.as_str(),
            self.created_at.format("%Y-%m-%d_%H-%M-%S"),
            self.container.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_encodes_kind_and_timestamp() {
        let mut item = CaptureItem::new(
            CaptureKind::Photo,
            MediaBlob::new(vec![1, 2, 3], "image/jpeg"),
            MediaContainer::Jpeg,
            MediaContainer::Jpeg,
            0,
        );
        item.created_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        assert_eq!(item.file_name("ar"), "ar_photo_2024-03-09_14-05-07.jpg");
    }

    #[test]
    fn video_file_name_uses_container_extension() {
        let mut item = CaptureItem::new(
            CaptureKind::Video,
            MediaBlob::new(vec![0u8; 4], "video/webm"),
            MediaContainer::WebM,
            MediaContainer::WebM,
            3,
        );
        item.created_at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

        assert_eq!(item.file_name("ar"), "ar_video_2024-12-31_23-59-59.webm");
    }

    #[test]
    fn ids_are_unique() {
        let a = CaptureItem::new(
            CaptureKind::Photo,
            MediaBlob::new(vec![], "image/jpeg"),
            MediaContainer::Jpeg,
            MediaContainer::Jpeg,
            0,
        );
        let b = CaptureItem::new(
            CaptureKind::Photo,
            MediaBlob::new(vec![], "image/jpeg"),
            MediaContainer::Jpeg,
            MediaContainer::Jpeg,
            1,
        );
        assert_ne!(a.id, b.id);
    }
}
