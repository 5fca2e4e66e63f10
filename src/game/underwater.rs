//! Underwater Effect
//!
//! Blends the scene fog toward a murky blue while the player is inside the
//! water volume, and back to the surface fog when they leave.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::physics::{OrientedBox, TriggerEvent, TriggerVolume};

/// Fog parameters the renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogSettings {
    /// RGBA
    pub color: [f32; 4],
    /// Exponential density
    pub density: f32,
    /// Linear start distance
    pub start: f32,
    /// Linear end distance
    pub end: f32,
}

impl FogSettings {
    /// Component-wise linear blend
    pub fn lerp(&self, other: &FogSettings, t: f32) -> FogSettings {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        FogSettings {
            color: Vec4::from(self.color)
                .lerp(Vec4::from(other.color), t)
                .to_array(),
            density: self.density + (other.density - self.density) * t,
            start: self.start + (other.start - self.start) * t,
            end: self.end + (other.end - self.end) * t,
        }
    }
}

/// Underwater look and how fast to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwaterSettings {
    pub fog: FogSettings,
    /// Seconds to blend fully in either direction
    pub transition_duration: f32,
}

impl Default for UnderwaterSettings {
    fn default() -> Self {
        Self {
            fog: FogSettings {
                color: [0.0, 0.4, 0.7, 0.3],
                density: 0.25,
                start: 0.0,
                end: 100.0,
            },
            transition_duration: 1.0,
        }
    }
}

/// Time-based fog transition driven by a water trigger volume.
#[derive(Debug, Clone)]
pub struct UnderwaterEffect {
    surface: FogSettings,
    underwater: FogSettings,
    duration: f32,
    volume: TriggerVolume,
    drives_background: bool,
    current: FogSettings,
    from: FogSettings,
    target: FogSettings,
    timer: f32,
    transitioning: bool,
    is_underwater: bool,
}

impl UnderwaterEffect {
    /// `surface` is the fog in effect when the scene starts.
    ///
    /// Without a camera the fog still blends but the background color is
    /// left alone.
    pub fn new(
        surface: FogSettings,
        settings: &UnderwaterSettings,
        volume: OrientedBox,
        has_camera: bool,
    ) -> Self {
        if !has_camera {
            log::error!("Underwater effect has no camera; background color will not follow fog");
        }
        Self {
            surface,
            underwater: settings.fog,
            duration: settings.transition_duration,
            volume: TriggerVolume::new(volume),
            drives_background: has_camera,
            current: surface,
            from: surface,
            target: surface,
            timer: 0.0,
            transitioning: false,
            is_underwater: false,
        }
    }

    /// Fog to render this frame
    #[inline]
    pub fn fog(&self) -> FogSettings {
        self.current
    }

    /// Camera clear color, when a camera is attached
    pub fn background_color(&self) -> Option<[f32; 4]> {
        self.drives_background.then_some(self.current.color)
    }

    pub fn is_underwater(&self) -> bool {
        self.is_underwater
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn volume(&self) -> &OrientedBox {
        &self.volume.bounds
    }

    /// Track the player and advance any running blend.
    pub fn update(&mut self, dt: f32, player_position: Vec3) -> Option<TriggerEvent> {
        let event = self.volume.update(player_position);
        match event {
            Some(TriggerEvent::Enter) => self.start_transition(true),
            Some(TriggerEvent::Exit) => self.start_transition(false),
            None => {}
        }
        self.advance(dt);
        event
    }

    /// Begin blending toward the underwater or the surface fog.
    ///
    /// Blending starts from whatever is showing now, so a re-trigger halfway
    /// through turns around smoothly instead of jumping.
    pub fn start_transition(&mut self, entering: bool) {
        self.is_underwater = entering;
        self.from = self.current;
        self.target = if entering { self.underwater } else { self.surface };
        self.timer = 0.0;
        self.transitioning = true;
        log::debug!(
            "{} water",
            if entering { "Entering" } else { "Leaving" }
        );
    }

    fn advance(&mut self, dt: f32) {
        if !self.transitioning {
            return;
        }
        self.timer += dt;
        let t = if self.duration > 0.0 {
            (self.timer / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.current = self.from.lerp(&self.target, t);
        if t >= 1.0 {
            self.transitioning = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> FogSettings {
        FogSettings {
            color: [0.5, 0.7, 0.9, 1.0],
            density: 0.01,
            start: 0.0,
            end: 300.0,
        }
    }

    fn effect() -> UnderwaterEffect {
        let volume = OrientedBox::from_min_max(Vec3::new(-10.0, -10.0, -10.0), Vec3::ZERO);
        UnderwaterEffect::new(surface(), &UnderwaterSettings::default(), volume, true)
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = surface();
        let b = UnderwaterSettings::default().fog;
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 2.0), b);
    }

    #[test]
    fn test_enter_reaches_underwater() {
        let mut fx = effect();
        assert_eq!(fx.update(0.1, Vec3::new(-5.0, -5.0, -5.0)), Some(TriggerEvent::Enter));
        assert!(fx.is_transitioning());
        for _ in 0..20 {
            fx.update(0.1, Vec3::new(-5.0, -5.0, -5.0));
        }
        assert!(!fx.is_transitioning());
        assert_eq!(fx.fog(), UnderwaterSettings::default().fog);
        assert_eq!(fx.background_color(), Some(fx.fog().color));
    }

    #[test]
    fn test_no_camera_leaves_background() {
        let volume = OrientedBox::from_min_max(Vec3::splat(-1.0), Vec3::ONE);
        let fx = UnderwaterEffect::new(surface(), &UnderwaterSettings::default(), volume, false);
        assert_eq!(fx.background_color(), None);
    }
}
