//! Story libraries: where page descriptions come from.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use storybook_core::display::Orientation;
use storybook_core::error::StoryError;
use storybook_core::probe::ImageProbe;
use storybook_scene::description::SceneDescription;

/// Source of page descriptions for one story. Implemented by the on-disk
/// [`StoryLibrary`] and by in-memory fakes in tests.
pub trait SceneSource: Send {
    fn page_count(&self) -> usize;

    /// Loads and validates the page at `index`.
    ///
    /// # Errors
    ///
    /// [`StoryError::PageOutOfRange`] for an unknown index; otherwise
    /// whatever reading or validating the description produces. A failed
    /// load must leave no side effects — the caller keeps the current page.
    fn load_page(
        &self,
        index: usize,
        orientation: Orientation,
        probe: &dyn ImageProbe,
    ) -> Result<SceneDescription, StoryError>;
}

/// Optional per-story metadata, read from `story.yaml` next to the pages.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryManifest {
    #[serde(default)]
    pub title: Option<String>,
    /// Start narration automatically when a page loads.
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

fn default_autoplay() -> bool {
    true
}

impl Default for StoryManifest {
    fn default() -> Self {
        Self {
            title: None,
            autoplay: true,
        }
    }
}

const MANIFEST_FILE: &str = "story.yaml";

/// One story on disk: a directory of page files whose lexical filename order
/// is the reading order, plus an optional manifest.
#[derive(Debug)]
pub struct StoryLibrary {
    pages: Vec<PathBuf>,
    manifest: StoryManifest,
}

impl StoryLibrary {
    /// Scans `root` for page files (`*.json`, sorted by file name) and reads
    /// the manifest if present.
    ///
    /// # Errors
    ///
    /// [`StoryError::Io`] if the directory cannot be read,
    /// [`StoryError::MalformedDescription`] for an unparseable manifest.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoryError> {
        let root = root.as_ref();
        let mut pages = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                pages.push(path);
            }
        }
        pages.sort();

        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            let source = fs::read_to_string(&manifest_path)?;
            serde_yaml::from_str(&source).map_err(|e| {
                StoryError::MalformedDescription(format!("story manifest: {e}"))
            })?
        } else {
            StoryManifest::default()
        };

        tracing::info!(
            story = manifest.title.as_deref().unwrap_or("untitled"),
            pages = pages.len(),
            "story opened"
        );
        Ok(Self { pages, manifest })
    }

    #[must_use]
    pub fn manifest(&self) -> &StoryManifest {
        &self.manifest
    }
}

impl SceneSource for StoryLibrary {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(
        &self,
        index: usize,
        orientation: Orientation,
        probe: &dyn ImageProbe,
    ) -> Result<SceneDescription, StoryError> {
        let path = self.pages.get(index).ok_or(StoryError::PageOutOfRange {
            requested: index,
            page_count: self.pages.len(),
        })?;
        let source = fs::read_to_string(path)?;
        SceneDescription::from_json(&source, orientation, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use storybook_core::geometry::Size;
    use storybook_test_support::FixedImageProbe;
    use storybook_test_support::scene_json::PageBuilder;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "storybook-library-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_page(dir: &Path, name: &str, text: &str) {
        let json = PageBuilder::new(name).narrated_text(text, 0.0, 0.5).build();
        fs::write(dir.join(format!("{name}.json")), json).unwrap();
    }

    #[test]
    fn test_pages_are_ordered_lexically_by_file_name() {
        let dir = scratch_dir("order");
        // Written out of order on purpose.
        write_page(&dir, "toad_02", "second page");
        write_page(&dir, "toad_01", "first page");
        write_page(&dir, "toad_03", "third page");

        let library = StoryLibrary::open(&dir).unwrap();
        assert_eq!(library.page_count(), 3);

        let probe = FixedImageProbe::new(Size::new(1600.0, 900.0));
        let first = library
            .load_page(0, Orientation::Landscape, &probe)
            .unwrap();
        assert_eq!(first.background_image, "toad_01");
    }

    #[test]
    fn test_manifest_is_read_when_present() {
        let dir = scratch_dir("manifest");
        write_page(&dir, "toad_01", "a page");
        fs::write(
            dir.join("story.yaml"),
            "title: The Hungry Toad\nautoplay: false\n",
        )
        .unwrap();

        let library = StoryLibrary::open(&dir).unwrap();
        assert_eq!(library.manifest().title.as_deref(), Some("The Hungry Toad"));
        assert!(!library.manifest().autoplay);
    }

    #[test]
    fn test_missing_manifest_defaults_to_autoplay() {
        let dir = scratch_dir("defaults");
        write_page(&dir, "toad_01", "a page");

        let library = StoryLibrary::open(&dir).unwrap();
        assert!(library.manifest().autoplay);
        assert!(library.manifest().title.is_none());
    }

    #[test]
    fn test_page_out_of_range() {
        let dir = scratch_dir("range");
        write_page(&dir, "toad_01", "a page");

        let library = StoryLibrary::open(&dir).unwrap();
        let probe = FixedImageProbe::new(Size::new(1600.0, 900.0));
        let result = library.load_page(5, Orientation::Landscape, &probe);
        match result.unwrap_err() {
            StoryError::PageOutOfRange {
                requested,
                page_count,
            } => {
                assert_eq!(requested, 5);
                assert_eq!(page_count, 1);
            }
            other => panic!("expected PageOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let result = StoryLibrary::open("/nonexistent/story/dir");
        assert!(matches!(result.unwrap_err(), StoryError::Io(_)));
    }
}
