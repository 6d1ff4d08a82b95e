//! Orbit camera controller

use glam::Vec3;
use winit::event::MouseButton;

use crate::core::camera::Camera;
use crate::core::input::InputState;

/// Orbit-style camera controller: drag to rotate around a target point,
/// scroll to change distance. Disabled by default; while disabled the
/// camera keeps its initial pose.
pub struct OrbitCameraController {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Whether user input is applied
    pub enabled: bool,
    /// Rotate the camera slowly when no input is given
    pub auto_rotate: bool,
    /// Auto-rotation speed in radians per second (negative = clockwise)
    pub auto_rotate_speed: f32,
    /// Smoothing factor for damped motion, per second
    pub damping: f32,
    /// Rotation sensitivity
    pub sensitivity: f32,
    yaw: f32,
    pitch: f32,
    distance: f32,
    // Damped values actually applied to the camera
    current_yaw: f32,
    current_pitch: f32,
    current_distance: f32,
    initialized: bool,
}

impl OrbitCameraController {
    /// Create a controller orbiting the given target
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enabled: false,
            auto_rotate: false,
            auto_rotate_speed: -0.5,
            damping: 10.0,
            sensitivity: 0.005,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            current_yaw: 0.0,
            current_pitch: 0.0,
            current_distance: 10.0,
            initialized: false,
        }
    }

    /// Adopt the camera's current pose as the orbit state.
    ///
    /// Called on the first update so enabling the controls doesn't snap
    /// the camera away from its configured initial position.
    fn sync_from_camera(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.distance = offset.length().max(0.01);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        self.current_yaw = self.yaw;
        self.current_pitch = self.pitch;
        self.current_distance = self.distance;
        self.initialized = true;
    }

    /// Update camera from input. No-op while disabled.
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, dt: f32) {
        if !self.initialized {
            self.sync_from_camera(camera);
        }
        if !self.enabled {
            return;
        }

        if input.is_mouse_button_pressed(MouseButton::Left) {
            let (dx, dy) = input.mouse_delta();
            self.yaw -= dx * self.sensitivity;
            self.pitch += dy * self.sensitivity;
            // Keep away from the poles
            self.pitch = self.pitch.clamp(-1.5, 1.5);
        } else if self.auto_rotate {
            self.yaw += self.auto_rotate_speed * dt;
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.distance = (self.distance * (1.0 - scroll * 0.1)).clamp(1.0, 400.0);
        }

        // Damped approach toward the target orbit state
        let t = (self.damping * dt).min(1.0);
        self.current_yaw += (self.yaw - self.current_yaw) * t;
        self.current_pitch += (self.pitch - self.current_pitch) * t;
        self.current_distance += (self.distance - self.current_distance) * t;

        let (sy, cy) = self.current_yaw.sin_cos();
        let (sp, cp) = self.current_pitch.sin_cos();
        let offset = Vec3::new(sy * cp, sp, cy * cp) * self.current_distance;
        camera.position = self.target + offset;
        camera.look_at(self.target);
    }

    /// Current orbit distance
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_keeps_camera_pose() {
        let mut controller = OrbitCameraController::new(Vec3::ZERO);
        let mut camera = Camera::new(Vec3::new(21.43, 4.51, -7.31), 75.0, 1.5);
        let before = camera.position;

        let input = InputState::new();
        controller.update(&mut camera, &input, 0.016);

        assert_eq!(camera.position, before);
    }

    #[test]
    fn test_sync_preserves_distance() {
        let mut controller = OrbitCameraController::new(Vec3::ZERO);
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), 75.0, 1.5);
        let input = InputState::new();
        controller.update(&mut camera, &input, 0.016);

        assert!((controller.distance() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_enabled_keeps_target_distance() {
        let mut controller = OrbitCameraController::new(Vec3::ZERO);
        controller.enabled = true;
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), 75.0, 1.5);
        let input = InputState::new();

        for _ in 0..60 {
            controller.update(&mut camera, &input, 0.016);
        }
        // No input: camera stays on the orbit sphere
        assert!((camera.position.length() - 10.0).abs() < 0.01);
        // And keeps looking at the target
        let to_target = (controller.target - camera.position).normalize();
        assert!((camera.forward() - to_target).length() < 0.001);
    }
}
