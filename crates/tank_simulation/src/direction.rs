//! Direction Vector Table: 4 стороны света → единичные векторы
//!
//! Экранные координаты: y растёт вниз, поэтому Up = (0, -1).

use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Порядок фиксирован: индекс случайного броска 0..4 → направление
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Визуальный поворот корпуса (градусы, по часовой от Up)
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Direction::Up => 0.0,
            Direction::Right => 90.0,
            Direction::Down => 180.0,
            Direction::Left => 270.0,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Равномерный выбор с пересэмплированием, пока не выпадет не `excluded`
    pub fn random_except<R: Rng + ?Sized>(rng: &mut R, excluded: Direction) -> Self {
        loop {
            let candidate = Self::random(rng);
            if candidate != excluded {
                return candidate;
            }
        }
    }
}
