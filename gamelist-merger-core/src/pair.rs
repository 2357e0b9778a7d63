use crate::model::GameList;

/// Two input lists ordered into master (field priority) and secondary.
#[derive(Debug, Clone)]
pub struct GameListPair {
    pub master: GameList,
    pub secondary: GameList,
    master_is_first: bool,
}

impl GameListPair {
    /// The list with more games becomes master.
    ///
    /// On a tie the second list is master. Callers that need a specific
    /// tie-break should order their arguments accordingly.
    pub fn new(first: GameList, second: GameList) -> Self {
        if first.total_games() > second.total_games() {
            Self {
                master: first,
                secondary: second,
                master_is_first: true,
            }
        } else {
            Self {
                master: second,
                secondary: first,
                master_is_first: false,
            }
        }
    }

    /// Whether the first list passed to [`GameListPair::new`] became master.
    pub fn master_is_first(&self) -> bool {
        self.master_is_first
    }
}
