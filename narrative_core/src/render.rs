//! Drawing seam. The scene describes what is on screen; the host's renderer
//! decides how it looks.

use game_rules::{ActorRole, Camera, Rgba, Transform};

use crate::dialog::DialogView;

/// Receives the scene's draw calls for one frame, in back-to-front order.
pub trait Renderer {
    fn clear(&mut self, color: Rgba);

    fn set_camera(&mut self, camera: &Camera);

    fn draw_sprite(&mut self, role: ActorRole, sprite: &str, transform: &Transform);

    fn draw_dialog(&mut self, view: &DialogView<'_>);
}
