use crate::models::error::ViewerError;
use crate::models::pose::RigidTransform;
use crate::models::scene::AnimationClip;

/// A visual node the viewer can show, hide and move. The placed model
/// and the reticle both sit behind this seam.
pub trait SceneNode {
    fn set_visible(&mut self, visible: bool);

    fn set_transform(&mut self, transform: &RigidTransform);
}

/// A loaded model: a scene graph plus zero or more named animation clips.
pub trait SceneModel: SceneNode {
    fn clips(&self) -> &[AnimationClip];
}

/// Loads the binary model asset and yields the opaque scene graph.
pub trait AssetLoader {
    fn load_model(&mut self, url: &str) -> Result<Box<dyn SceneModel>, ViewerError>;
}
