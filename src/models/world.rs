use crate::error::{AppResult, DomainError};
use crate::models::room::Room;
use crate::models::types::{Direction, RoomId};
use tracing::warn;

/// Arena holding every room of a game session. Rooms refer to each other by `RoomId` only.
#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: Vec<Room>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, key: &str, name: &str, description: &str) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room::new(id, key, name, description));
        id
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    pub fn room_by_key(&self, key: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.key.eq_ignore_ascii_case(key))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    fn require(&self, id: RoomId) -> AppResult<()> {
        if id.0 < self.rooms.len() {
            Ok(())
        } else {
            Err(DomainError::RoomNotFound(id.to_string()))
        }
    }

    /// Links `a --dir--> b` and `b --opposite--> a` in one step. Any link either end had
    /// in those directions is detached from its far side first, so no one-way edge remains.
    pub fn link(&mut self, a: RoomId, b: RoomId, dir: Direction) -> AppResult<()> {
        self.require(a)?;
        self.require(b)?;

        let back = dir.opposite();
        self.detach(a, dir);
        self.detach(b, back);

        self.rooms[a.0].set_exit(dir, b);
        self.rooms[b.0].set_exit(back, a);
        Ok(())
    }

    fn detach(&mut self, from: RoomId, dir: Direction) {
        let Some(old) = self.rooms[from.0].linked(dir) else {
            return;
        };
        self.rooms[from.0].clear_exit(dir);
        if self.rooms[old.0].linked(dir.opposite()) == Some(from) {
            self.rooms[old.0].clear_exit(dir.opposite());
        }
    }

    /// Same as `link`, with a direction token as found in world data. Unknown tokens
    /// and rooms are logged and leave the world untouched.
    pub fn connect(&mut self, a: RoomId, b: RoomId, token: &str) -> bool {
        let Some(dir) = Direction::parse(token.trim()) else {
            warn!(from = %a, to = %b, token, "ignoring link with unknown direction");
            return false;
        };

        match self.link(a, b, dir) {
            Ok(()) => true,
            Err(e) => {
                warn!(from = %a, to = %b, error = %e, "ignoring link");
                false
            }
        }
    }

    pub fn lock(&mut self, room: RoomId, dir: Direction) -> AppResult<bool> {
        self.require(room)?;
        Ok(self.rooms[room.0].lock(dir))
    }

    pub fn unlock(&mut self, room: RoomId, dir: Direction) -> AppResult<bool> {
        self.require(room)?;
        Ok(self.rooms[room.0].unlock(dir))
    }

    pub fn neighbor(&self, room: RoomId, dir: Direction) -> Option<RoomId> {
        self.room(room)?.neighbor(dir)
    }
}
