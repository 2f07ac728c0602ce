mod circle;
mod random;
mod rect;

pub use self::circle::Circle;
pub use self::random::Random;
pub use self::rect::Rect;

pub use cgmath::{vec2, Matrix4};

pub type Vec2<T> = cgmath::Vector2<T>;
pub type Vec2f = Vec2<f32>;
pub type Mat4 = Matrix4<f32>;

pub mod prelude {
    pub use cgmath::prelude::*;
}
