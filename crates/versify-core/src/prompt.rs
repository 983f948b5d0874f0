//! Prompt assembly and token budgeting.
//!
//! Formats the selected songs into a generation prompt and trims the
//! least-connected songs until the prompt fits the token budget.

use crate::error::{Error, Result};
use crate::model::Song;

/// System instruction given to the completion model.
pub const SYSTEM_PROMPT: &str =
    "You generate lyrics of a song in the style of example songs that you are given.";

/// Default hard limit on combined prompt tokens. The target model's
/// context window is 4096 tokens shared between prompt and response,
/// so the prompt is capped below that to reserve response headroom.
pub const DEFAULT_TOKEN_BUDGET: usize = 3200;

/// Counts the tokens a text costs under a specific target model's
/// tokenizer. Must be deterministic for a given model.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize>;
}

/// A prompt pair that fits the token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetedPrompt {
    pub system: String,
    pub user: String,
    /// How many of the input songs survived trimming.
    pub songs_used: usize,
    /// Measured combined token cost of `system` + `user`.
    pub tokens: usize,
}

/// Trims a ranked song list until its prompt fits a hard token limit.
#[derive(Debug, Clone, Copy)]
pub struct PromptBudgeter {
    limit: usize,
}

impl PromptBudgeter {
    pub fn new(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Precondition(
                "token budget must be positive".into(),
            ));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Assemble a prompt from `songs` (most important first), dropping
    /// the last song and re-measuring until the combined token cost is
    /// within the limit.
    ///
    /// Token cost does not scale linearly with song count (delimiter
    /// overhead, sub-word effects), so every iteration re-measures the
    /// exact reassembled text. Fails with [`Error::BudgetExhausted`]
    /// when even a single song is over the limit.
    pub fn build(
        &self,
        mut songs: Vec<&Song>,
        counter: &dyn TokenCounter,
    ) -> Result<BudgetedPrompt> {
        if songs.is_empty() {
            return Err(Error::Precondition(
                "prompt assembly requires at least one song".into(),
            ));
        }

        loop {
            let (system, user) = assemble_prompt(&songs);
            let tokens = counter.count_tokens(&format!("{system}{user}"))?;
            if tokens <= self.limit {
                return Ok(BudgetedPrompt {
                    system,
                    user,
                    songs_used: songs.len(),
                    tokens,
                });
            }
            songs.pop();
            if songs.is_empty() {
                return Err(Error::BudgetExhausted {
                    limit: self.limit,
                    tokens,
                });
            }
            log::debug!(
                "prompt costs {tokens} tokens against a limit of {}; dropping least-connected song",
                self.limit
            );
        }
    }
}

/// Build the (system, user) prompt pair for the given songs.
///
/// Each song becomes a titled, delimited block of its full lyrics; the
/// blocks are embedded into a fixed instruction that demands original
/// lyrics and nothing else.
pub fn assemble_prompt(songs: &[&Song]) -> (String, String) {
    let mut corpus = String::new();
    for song in songs {
        corpus.push_str("----------");
        corpus.push_str(&song.title);
        corpus.push_str("----------\n");
        corpus.push_str(&song.lyrics);
    }

    let user = format!(
        "Write a unique and original song lyrics in a similar style to that of the \
         following songs: {corpus}. Ensure that the lyrics are completely original! \
         Don't reuse phrasing from the given lyrics. Remove any additional text that \
         is not a part of the lyrics!"
    );
    (SYSTEM_PROMPT.to_string(), user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Discography;

    /// Charges a fixed cost per song block plus a fixed template
    /// overhead, ignoring the actual text.
    #[derive(Debug)]
    struct BlockCounter {
        per_block: usize,
        overhead: usize,
    }

    impl TokenCounter for BlockCounter {
        fn count_tokens(&self, text: &str) -> crate::Result<usize> {
            let blocks = text.matches("----------\n").count();
            Ok(blocks * self.per_block + self.overhead)
        }
    }

    /// One token per whitespace-separated word.
    #[derive(Debug)]
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count_tokens(&self, text: &str) -> crate::Result<usize> {
            Ok(text.split_whitespace().count())
        }
    }

    fn songs_with_lyrics(lyrics: &str, n: usize) -> Discography {
        let mut discography = Discography::new("Artist").unwrap();
        for i in 0..n {
            discography
                .add_song(format!("Song {i}"), lyrics, vec![1.0, 0.0])
                .unwrap();
        }
        discography
    }

    #[test]
    fn test_assemble_prompt_delimits_each_song() {
        let discography = songs_with_lyrics("first line\nsecond line", 2);
        let songs: Vec<&Song> = discography.songs().collect();
        let (system, user) = assemble_prompt(&songs);

        assert_eq!(system, SYSTEM_PROMPT);
        assert!(user.contains("----------Song 0----------\n"));
        assert!(user.contains("----------Song 1----------\n"));
        assert!(user.contains("first line\nsecond line"));
        assert!(user.contains("Ensure that the lyrics are completely original!"));
    }

    #[test]
    fn test_prompt_within_budget_keeps_all_songs() {
        let discography = songs_with_lyrics("short", 3);
        let songs: Vec<&Song> = discography.songs().collect();
        let budgeter = PromptBudgeter::new(10_000).unwrap();
        let prompt = budgeter.build(songs, &WordCounter).unwrap();

        assert_eq!(prompt.songs_used, 3);
        assert!(prompt.tokens <= 10_000);
    }

    /// The worked scenario: six songs at 1000 tokens each with ~50
    /// tokens of template overhead against a 3200 budget must trim
    /// down to exactly three songs.
    #[test]
    fn test_trimming_removes_exactly_enough_songs() {
        let discography = songs_with_lyrics("whatever", 6);
        let songs: Vec<&Song> = discography.songs().collect();
        let counter = BlockCounter {
            per_block: 1000,
            overhead: 50,
        };
        let budgeter = PromptBudgeter::new(3200).unwrap();
        let prompt = budgeter.build(songs, &counter).unwrap();

        assert_eq!(prompt.songs_used, 3);
        assert_eq!(prompt.tokens, 3050);
        // The survivors are the most important (earliest) songs.
        assert!(prompt.user.contains("----------Song 0----------"));
        assert!(prompt.user.contains("----------Song 2----------"));
        assert!(!prompt.user.contains("----------Song 3----------"));
    }

    #[test]
    fn test_single_oversized_song_exhausts_budget() {
        let discography = songs_with_lyrics("way too long", 2);
        let songs: Vec<&Song> = discography.songs().collect();
        let counter = BlockCounter {
            per_block: 5000,
            overhead: 50,
        };
        let budgeter = PromptBudgeter::new(3200).unwrap();

        let err = budgeter.build(songs, &counter).unwrap_err();
        assert!(matches!(
            err,
            Error::BudgetExhausted {
                limit: 3200,
                tokens: 5050,
            }
        ));
    }

    #[test]
    fn test_empty_song_list_is_a_precondition_error() {
        let budgeter = PromptBudgeter::new(3200).unwrap();
        let err = budgeter.build(Vec::new(), &WordCounter).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        assert!(PromptBudgeter::new(0).is_err());
    }
}
