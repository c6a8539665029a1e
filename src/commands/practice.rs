//! Practice and learn commands

use crate::commands::{CommandContext, CommandResult};
use crate::learn::{LearnFeedback, LearnSession};
use crate::practice::{KeyFeedback, PracticeMode};
use colored::*;
use etude_core::types::{find_song, Voice};

/// Handle `practice mode <free|guided|feedback>`
pub fn cmd_practice_mode(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(mode) = PracticeMode::from_name(args.trim()) else {
        return CommandResult::Error(format!(
            "Unknown mode: {} (expected free, guided, or feedback)",
            args
        ));
    };

    ctx.practice.set_mode(mode);
    let msg = match mode {
        PracticeMode::Free => "🎹 Free play - any key goes.",
        PracticeMode::Guided => "🎯 Guided practice - the whole song is highlighted.",
        PracticeMode::Feedback => "📊 Feedback practice - presses are scored in order.",
    };
    CommandResult::Message(msg.bright_green().to_string())
}

/// Handle `practice song <id>`
pub fn cmd_practice_song(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let id = args.trim();
    match ctx.practice.select_song(id) {
        Some(song) => CommandResult::Message(
            format!("Selected {} ({}) - stats reset", song.name, song.difficulty)
                .bright_green()
                .to_string(),
        ),
        None => CommandResult::Error(format!("Unknown song: {} (see 'songs')", id)),
    }
}

/// Handle `practice press <note>` - sound the key and judge it
pub fn cmd_practice_press(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let note = args.trim();
    if note.is_empty() {
        return CommandResult::Error("Usage: practice press <note>".to_string());
    }

    ctx.synth.play_note(note, Voice::Piano);

    match ctx.practice.handle_key_press(note) {
        KeyFeedback::Unjudged => {
            let highlighted = ctx.practice.highlighted_keys();
            if highlighted.is_empty() {
                CommandResult::Message(format!("♪ {}", note))
            } else {
                CommandResult::Message(format!(
                    "♪ {} - highlighted: {}",
                    note,
                    highlighted.join(" ")
                ))
            }
        }
        KeyFeedback::Correct => {
            let stats = ctx.practice.stats();
            CommandResult::Message(
                format!(
                    "✔ Correct! streak {}, next: {}",
                    stats.streak,
                    ctx.practice.expected_note()
                )
                .bright_green()
                .to_string(),
            )
        }
        KeyFeedback::Wrong { expected } => CommandResult::Message(
            format!(
                "✘ Try again! expected {}, next: {}",
                expected,
                ctx.practice.expected_note()
            )
            .red()
            .to_string(),
        ),
    }
}

/// Handle `practice stats`
pub fn cmd_practice_stats(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let stats = ctx.practice.stats();
    CommandResult::Message(format!(
        "Accuracy {}%  ·  {} correct of {}  ·  streak {}",
        stats.accuracy, stats.correct_notes, stats.total_notes, stats.streak
    ))
}

/// Handle `practice reset`
pub fn cmd_practice_reset(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.practice.reset_stats();
    CommandResult::Message("Practice stats reset.".bright_green().to_string())
}

/// Handle bare `practice` - status line
pub fn cmd_practice_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let song = ctx.practice.song();
    CommandResult::Message(format!(
        "Practicing {} in {} mode ({} notes)",
        song.name.bright_yellow(),
        ctx.practice.mode().name(),
        song.len()
    ))
}

/// Handle `learn start [song-id]`
pub fn cmd_learn_start(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let id = if args.trim().is_empty() {
        "twinkle"
    } else {
        args.trim()
    };
    let Some(song) = find_song(id) else {
        return CommandResult::Error(format!("Unknown song: {} (see 'songs')", id));
    };

    {
        let mut learn = ctx.learn.lock().unwrap();
        *learn = Some(LearnSession::new(song));
    }

    if let Err(e) = ctx.player.play(song, ctx.metronome.tempo()) {
        return CommandResult::Error(format!("Failed to start song playback: {}", e));
    }

    CommandResult::Message(
        format!(
            "🎵 {} at {} BPM - follow the falling notes!",
            song.name,
            ctx.metronome.tempo()
        )
        .bright_green()
        .to_string(),
    )
}

/// Handle `learn press <note>`
pub fn cmd_learn_press(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let note = args.trim();
    if note.is_empty() {
        return CommandResult::Error("Usage: learn press <note>".to_string());
    }

    ctx.synth.play_note(note, Voice::Piano);

    let mut learn = ctx.learn.lock().unwrap();
    let Some(session) = learn.as_mut() else {
        return CommandResult::Error("No learn session - 'learn start' first".to_string());
    };

    match session.handle_key_press(note) {
        LearnFeedback::Idle => {
            CommandResult::Message("Song isn't playing - 'learn start' to go again".to_string())
        }
        LearnFeedback::Correct { score } => CommandResult::Message(
            format!("✔ Correct! Score: {}", score).bright_green().to_string(),
        ),
        LearnFeedback::Wrong { expected } => CommandResult::Message(
            format!("✘ Wrong note! Expected: {}", expected)
                .red()
                .to_string(),
        ),
        LearnFeedback::Completed { score } => {
            let _ = ctx.player.stop();
            CommandResult::Message(
                format!("🏆 Song completed! Final score: {}", score)
                    .bright_green()
                    .to_string(),
            )
        }
    }
}

/// Handle `learn stop`
pub fn cmd_learn_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if let Err(e) = ctx.player.stop() {
        return CommandResult::Error(format!("Failed to stop playback: {}", e));
    }

    let mut learn = ctx.learn.lock().unwrap();
    match learn.as_mut() {
        Some(session) => {
            session.finish();
            CommandResult::Message(
                format!("Stopped - score so far: {}", session.score())
                    .bright_green()
                    .to_string(),
            )
        }
        None => CommandResult::Message("No learn session to stop.".to_string()),
    }
}

/// Handle `learn score`
pub fn cmd_learn_score(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let learn = ctx.learn.lock().unwrap();
    match learn.as_ref() {
        Some(session) => CommandResult::Message(format!(
            "Score: {}  ·  {}% of {} complete",
            session.score(),
            session.progress_percent(),
            session.song().name
        )),
        None => CommandResult::Message("No learn session - 'learn start' first".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Metronome, ToneSynthesizer};
    use crate::learn::SongPlayer;
    use std::sync::{Arc, Mutex};

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
    fn test_practice_flow() {
        let mut ctx = test_context();

        assert!(matches!(
            cmd_practice_song("mary", &mut ctx),
            CommandResult::Message(_)
        ));
        assert!(matches!(
            cmd_practice_mode("feedback", &mut ctx),
            CommandResult::Message(_)
        ));

        // Mary starts on E4
        cmd_practice_press("E4", &mut ctx);
        assert_eq!(ctx.practice.stats().correct_notes, 1);

        cmd_practice_press("A5", &mut ctx);
        assert_eq!(ctx.practice.stats().streak, 0);
    }

    #[test]
    fn test_unknown_song_and_mode_error() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_practice_song("chopsticks", &mut ctx),
            CommandResult::Error(_)
        ));
        assert!(matches!(
            cmd_practice_mode("zen", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_learn_requires_a_session() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_learn_press("C4", &mut ctx),
            CommandResult::Error(_)
        ));

        assert!(matches!(
            cmd_learn_start("", &mut ctx),
            CommandResult::Message(_)
        ));
        let _ = ctx.player.stop();

        // Twinkle starts on C4
        assert!(matches!(
            cmd_learn_press("C4", &mut ctx),
            CommandResult::Message(_)
        ));
        assert_eq!(ctx.learn.lock().unwrap().as_ref().unwrap().score(), 10);
    }
}
