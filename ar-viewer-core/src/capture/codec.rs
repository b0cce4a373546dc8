use crate::models::capture_item::MediaContainer;
use crate::support::first_supported;
use crate::traits::recorder::RecorderBackend;

/// Candidate encoding formats, most broadly compatible first.
pub const MIME_CANDIDATES: [&str; 5] = [
    "video/mp4;codecs=avc1.42E01E,mp4a.40.2",
    "video/mp4",
    "video/webm;codecs=vp9,opus",
    "video/webm;codecs=vp8",
    "video/webm",
];

/// First candidate the platform reports as supported, or `None` when the
/// list is exhausted (recording then downgrades to simulated mode).
pub fn probe_mime_type(backend: &dyn RecorderBackend) -> Option<&'static str> {
    first_supported(MIME_CANDIDATES, |c| backend.supports_mime_type(c))
}

/// Container implied by a recorder mime type.
pub fn container_for_mime(mime_type: &str) -> MediaContainer {
    if mime_type.contains("mp4") {
        MediaContainer::Mp4
    } else {
        MediaContainer::WebM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::ViewerError;
    use crate::traits::audio::AudioTapHandle;
    use crate::traits::surface::StreamHandle;

    struct ProbeOnly<'a> {
        supported: &'a [&'a str],
    }

    impl RecorderBackend for ProbeOnly<'_> {
        fn is_available(&self) -> bool {
            true
        }

        fn supports_mime_type(&self, mime_type: &str) -> bool {
            self.supported.contains(&mime_type)
        }

        fn start(
            &mut self,
            _stream: StreamHandle,
            _audio: Option<AudioTapHandle>,
            _mime_type: &str,
        ) -> Result<(), ViewerError> {
            Ok(())
        }

        fn stop(&mut self) {}
    }

    #[test]
    fn prefers_mp4_when_supported() {
        let backend = ProbeOnly {
            supported: &["video/webm", "video/mp4"],
        };
        assert_eq!(probe_mime_type(&backend), Some("video/mp4"));
    }

    #[test]
    fn falls_back_through_webm_variants() {
        let backend = ProbeOnly {
            supported: &["video/webm;codecs=vp8"],
        };
        assert_eq!(probe_mime_type(&backend), Some("video/webm;codecs=vp8"));
    }

    #[test]
    fn exhausted_list_yields_none() {
        let backend = ProbeOnly { supported: &[] };
        assert_eq!(probe_mime_type(&backend), None);
    }

    #[test]
    fn container_derivation() {
        assert_eq!(
            container_for_mime("video/mp4;codecs=avc1.42E01E,mp4a.40.2"),
            MediaContainer::Mp4
        );
        assert_eq!(container_for_mime("video/webm;codecs=vp9,opus"), MediaContainer::WebM);
    }
}
