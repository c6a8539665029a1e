//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod audio;
pub mod general;
pub mod metronome;
pub mod practice;

use crate::audio::{Metronome, ToneSynthesizer};
use crate::learn::{LearnSession, SongPlayer};
use crate::practice::PracticeSession;
use std::sync::{Arc, Mutex};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Input didn't match any registered command
    Unknown,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers.
///
/// Every engine piece lives here as a single owned instance, constructed
/// once at startup and passed explicitly - no global accessors.
pub struct CommandContext {
    pub synth: ToneSynthesizer,
    pub metronome: Metronome,
    pub practice: PracticeSession,
    pub player: SongPlayer,
    /// The active learn run, shared with the player-event listener
    pub learn: Arc<Mutex<Option<LearnSession>>>,
}

impl CommandContext {
    pub fn new(
        synth: ToneSynthesizer,
        metronome: Metronome,
        player: SongPlayer,
        learn: Arc<Mutex<Option<LearnSession>>>,
    ) -> Self {
        Self {
            synth,
            metronome,
            practice: PracticeSession::new(),
            player,
            learn,
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "metronome tempo")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning Unknown if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::Unknown
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Keyboard commands
    registry.register("play", audio::cmd_play);
    registry.register("volume", audio::cmd_volume);

    // Metronome commands
    registry.register("metronome start", metronome::cmd_metronome_start);
    registry.register("metronome stop", metronome::cmd_metronome_stop);
    registry.register("metronome tempo", metronome::cmd_metronome_tempo);
    registry.register("metronome on", metronome::cmd_metronome_on);
    registry.register("metronome off", metronome::cmd_metronome_off);
    registry.register("metronome", metronome::cmd_metronome_status);

    // Practice commands
    registry.register("practice mode", practice::cmd_practice_mode);
    registry.register("practice song", practice::cmd_practice_song);
    registry.register("practice press", practice::cmd_practice_press);
    registry.register("practice stats", practice::cmd_practice_stats);
    registry.register("practice reset", practice::cmd_practice_reset);
    registry.register("practice", practice::cmd_practice_status);

    // Learn commands
    registry.register("learn start", practice::cmd_learn_start);
    registry.register("learn press", practice::cmd_learn_press);
    registry.register("learn stop", practice::cmd_learn_stop);
    registry.register("learn score", practice::cmd_learn_score);

    // General commands
    registry.register("songs", general::cmd_songs);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> CommandContext {
        let (player, _events) = SongPlayer::new();
        CommandContext::new(
            ToneSynthesizer::disabled(),
            Metronome::new(120, None),
            player,
            Arc::new(Mutex::new(None)),
        )
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = create_registry();
        let mut ctx = test_context();

        // "metronome tempo 90" must hit the tempo handler, not the
        // bare "metronome" status handler
        match registry.execute("metronome tempo 90", &mut ctx) {
            CommandResult::Message(_) => {}
            other => panic!("expected message, got {:?}", other),
        }
        assert_eq!(ctx.metronome.tempo(), 90);
    }

    #[test]
    fn test_unmatched_input() {
        let registry = create_registry();
        let mut ctx = test_context();
        assert!(matches!(
            registry.execute("transmogrify", &mut ctx),
            CommandResult::Unknown
        ));
    }

    #[test]
    fn test_exit_command() {
        let registry = create_registry();
        let mut ctx = test_context();
        assert!(matches!(
            registry.execute("exit", &mut ctx),
            CommandResult::Exit
        ));
    }
}
