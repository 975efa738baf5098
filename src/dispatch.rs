//! Seam between the gesture core and the scene. The engine emits `Action`
//! values; the dispatcher turns them into calls on the two capability
//! traits the rendering layer implements. Pick-up and throw can be
//! overridden with user callbacks (the viewer routes throws into its
//! physics handler).

use crate::types::{Action, Point3};

/// Camera and selectable-object surface of the scene.
pub trait SceneCamera {
    fn rotate_camera(&mut self, yaw: f32, pitch: f32);
    /// Move the camera along its view direction.
    fn dolly_zoom(&mut self, delta: f32);
    /// Ordered list of selectable-object identifiers.
    fn selectable_ids(&self) -> Vec<String>;
    fn highlight(&mut self, id: &str);
    fn clear_highlight(&mut self);
    fn enter(&mut self, id: &str);
}

/// External "held object" context.
pub trait HeldObjectContext {
    fn is_held(&self) -> bool;
    fn is_thrown(&self) -> bool;
    fn pick_up(&mut self);
    fn throw(&mut self, velocity: Point3);
}

type PickUpOverride = Box<dyn FnMut()>;
type ThrowOverride = Box<dyn FnMut(Point3)>;

/// Stateless translator from actions to scene calls, plus the optional
/// override callbacks.
#[derive(Default)]
pub struct ActionDispatcher {
    on_pick_up: Option<PickUpOverride>,
    on_throw: Option<ThrowOverride>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pick_up_override(&mut self, cb: PickUpOverride) {
        self.on_pick_up = Some(cb);
    }

    pub fn set_throw_override(&mut self, cb: ThrowOverride) {
        self.on_throw = Some(cb);
    }

    pub fn dispatch(
        &mut self,
        action: &Action,
        scene: &mut dyn SceneCamera,
        held: &mut dyn HeldObjectContext,
    ) {
        match action {
            Action::RotateCamera { yaw, pitch } => scene.rotate_camera(*yaw, *pitch),
            Action::DollyZoom { delta } => scene.dolly_zoom(*delta),
            Action::Highlight { index } => {
                if let Some(id) = scene.selectable_ids().get(*index) {
                    let id = id.clone();
                    scene.highlight(&id);
                }
            }
            Action::Enter { index } => {
                if let Some(id) = scene.selectable_ids().get(*index) {
                    let id = id.clone();
                    scene.enter(&id);
                }
            }
            Action::PickUp => match &mut self.on_pick_up {
                Some(cb) => cb(),
                None => held.pick_up(),
            },
            Action::Throw { velocity } => match &mut self.on_throw {
                Some(cb) => cb(*velocity),
                None => held.throw(*velocity),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeScene {
        highlighted: Vec<String>,
        entered: Vec<String>,
        yaw: f32,
        dolly: f32,
    }

    impl SceneCamera for FakeScene {
        fn rotate_camera(&mut self, yaw: f32, _pitch: f32) {
            self.yaw += yaw;
        }
        fn dolly_zoom(&mut self, delta: f32) {
            self.dolly += delta;
        }
        fn selectable_ids(&self) -> Vec<String> {
            vec!["mercury".into(), "venus".into(), "earth".into()]
        }
        fn highlight(&mut self, id: &str) {
            self.highlighted.push(id.to_string());
        }
        fn clear_highlight(&mut self) {}
        fn enter(&mut self, id: &str) {
            self.entered.push(id.to_string());
        }
    }

    #[derive(Default)]
    struct FakeHeld {
        held: bool,
        thrown: Option<Point3>,
    }

    impl HeldObjectContext for FakeHeld {
        fn is_held(&self) -> bool {
            self.held
        }
        fn is_thrown(&self) -> bool {
            self.thrown.is_some()
        }
        fn pick_up(&mut self) {
            self.held = true;
        }
        fn throw(&mut self, velocity: Point3) {
            self.held = false;
            self.thrown = Some(velocity);
        }
    }

    #[test]
    fn highlight_maps_index_to_id() {
        let mut d = ActionDispatcher::new();
        let mut scene = FakeScene::default();
        let mut held = FakeHeld::default();
        d.dispatch(&Action::Highlight { index: 1 }, &mut scene, &mut held);
        assert_eq!(scene.highlighted, vec!["venus".to_string()]);
        // Out of range is ignored.
        d.dispatch(&Action::Highlight { index: 7 }, &mut scene, &mut held);
        assert_eq!(scene.highlighted.len(), 1);
    }

    #[test]
    fn pick_up_defaults_to_held_context() {
        let mut d = ActionDispatcher::new();
        let mut scene = FakeScene::default();
        let mut held = FakeHeld::default();
        d.dispatch(&Action::PickUp, &mut scene, &mut held);
        assert!(held.held);
    }

    #[test]
    fn throw_override_wins() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(None));
        let seen2 = seen.clone();

        let mut d = ActionDispatcher::new();
        d.set_throw_override(Box::new(move |v| {
            *seen2.borrow_mut() = Some(v);
        }));
        let mut scene = FakeScene::default();
        let mut held = FakeHeld {
            held: true,
            thrown: None,
        };
        let v = Point3::new(0.6, 0.8, -1.0);
        d.dispatch(&Action::Throw { velocity: v }, &mut scene, &mut held);
        assert_eq!(*seen.borrow(), Some(v));
        assert!(held.thrown.is_none(), "override must replace the default");
    }
}
