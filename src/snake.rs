use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit step in grid cells, y grows downwards.
    pub fn offset(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    // Segments appended since the last step; they share the head's cell.
    fresh: usize,
}

impl Snake {
    pub fn new(head: Coords, direction: Direction) -> Self {
        Snake { body: vec![head], direction, fresh: 0 }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    /// Pulls every segment onto its predecessor's cell, tail first, then
    /// moves the head one cell of `cell_size` pixels along the direction.
    pub fn move_step(&mut self, cell_size: i32) -> Coords {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.offset();
        let head = &mut self.body[0];
        head.0 += dx * cell_size;
        head.1 += dy * cell_size;

        self.fresh = 0;
        *head
    }

    pub fn grow(&mut self, at: Coords) {
        self.body.push(at);
        self.fresh += 1;
    }

    pub fn bites_itself(&self) -> bool {
        let settled = self.body.len() - self.fresh;
        let head = self.head();
        self.body.iter().take(settled).skip(1).any(|pos| *pos == head)
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction, fresh: 0 }
    }
}
