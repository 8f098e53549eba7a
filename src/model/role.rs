use strum::{Display, EnumString};

/// The two portal roles. Stored in JWT claims as a numeric id and
/// validated at the access-control boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student = 1,
    Teacher = 2,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Student),
            2 => Some(Role::Teacher),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }
}
