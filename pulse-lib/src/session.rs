/// A bound identity. Passed explicitly into every core operation; nothing in
/// the crate reads ambient login state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
