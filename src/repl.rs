//! Interactive REPL for driving the practice engine.
//!
//! The front end the mobile screens stand in for: one prompt, the
//! command registry, and a listener thread that prints the learn-mode
//! prompts as the song player announces them.

use crate::audio::{Metronome, ToneSynthesizer};
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::learn::{LearnSession, PlayerEvent, SongPlayer};
use anyhow::Result;
use colored::*;
use crossbeam_channel::Receiver;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

/// Tempo the session opens with.
pub const DEFAULT_TEMPO_BPM: u32 = 120;

/// Interactive practice session front end
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance with the whole engine wired up:
    /// synthesizer, metronome sharing the synthesizer's output, song
    /// player, and the learn-session listener.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        let synth = ToneSynthesizer::new();
        let metronome = Metronome::new(DEFAULT_TEMPO_BPM, synth.output());
        let (player, events) = SongPlayer::new();
        let learn = Arc::new(Mutex::new(None));

        spawn_event_listener(events, learn.clone());

        Ok(Repl {
            editor,
            registry: create_registry(),
            ctx: CommandContext::new(synth, metronome, player, learn),
        })
    }

    /// Run until `exit`, Ctrl-C, or Ctrl-D, then tear the engine down.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "🎹 Etude - piano practice engine".bright_cyan());
        if !self.ctx.synth.is_active() {
            println!(
                "{}",
                "(no audio device found - running silently)".yellow()
            );
        }
        println!("Type 'help' for commands.\n");

        loop {
            match self.editor.readline("etude> ") {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(input);

                    match self.registry.execute(input, &mut self.ctx) {
                        CommandResult::Success => {}
                        CommandResult::Message(msg) => println!("{}", msg),
                        CommandResult::Error(msg) => eprintln!("{}", msg.red()),
                        CommandResult::Unknown => {
                            println!("{}", "Unknown command - try 'help'".yellow())
                        }
                        CommandResult::Exit => break,
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        self.ctx.metronome.stop();
        let _ = self.ctx.player.stop();
        self.ctx.synth.cleanup();
        println!("Goodbye! 🎹");
        Ok(())
    }
}

/// Print player announcements and feed falling notes into the learn
/// session as they become due.
fn spawn_event_listener(
    events: Receiver<PlayerEvent>,
    learn: Arc<Mutex<Option<LearnSession>>>,
) {
    thread::spawn(move || {
        for event in events {
            match event {
                PlayerEvent::NoteDue { index, note } => {
                    let now = Instant::now();
                    if let Ok(mut guard) = learn.lock() {
                        if let Some(session) = guard.as_mut() {
                            session.spawn_note(note, now);
                            session.sweep_expired(now);
                            println!(
                                "{}",
                                format!(
                                    "  ⬇ {}  ({}/{})",
                                    note,
                                    index + 1,
                                    session.song().len()
                                )
                                .bright_blue()
                            );
                        }
                    }
                }
                PlayerEvent::Finished { .. } => {
                    println!(
                        "{}",
                        "  ♪ Song finished - 'learn score' to see how you did".bright_blue()
                    );
                }
            }
        }
    });
}
