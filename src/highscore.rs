use crate::consts;
use crate::store::{LoadError, SaveError, Store};

/// The best score achieved so far, persisted in a [`Store`] under
/// [`HIGH_SCORE_KEY`][consts::HIGH_SCORE_KEY]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScore<S> {
    store: S,
    best: u32,
}

impl<S: Store> HighScore<S> {
    /// Create a `HighScore` of zero backed by `store`.  Call
    /// [`HighScore::load()`] to read the persisted value.
    pub(crate) fn new(store: S) -> HighScore<S> {
        HighScore { store, best: 0 }
    }

    /// Read the persisted high score from the store.  An absent value leaves
    /// the high score at zero.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the store could not be read or the stored value is
    /// not a non-negative integer.  The high score is left unchanged.
    pub(crate) fn load(&mut self) -> Result<(), LoadError> {
        let Some(value) = self.store.get(consts::HIGH_SCORE_KEY)? else {
            return Ok(());
        };
        self.best = value
            .trim()
            .parse()
            .map_err(|e| LoadError::parse(consts::HIGH_SCORE_KEY, e))?;
        Ok(())
    }

    /// If `score` beats the current high score, make it the new high score
    /// and persist it.  Returns `true` if the high score changed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the new high score could not be persisted.  The
    /// in-memory high score is updated regardless.
    pub(crate) fn record(&mut self, score: u32) -> Result<bool, SaveError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        self.store
            .set(consts::HIGH_SCORE_KEY, &score.to_string())?;
        Ok(true)
    }
}

impl<S> HighScore<S> {
    pub(crate) fn get(&self) -> u32 {
        self.best
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
