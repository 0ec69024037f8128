//! This module aggregates all the command modules for the bot.

/// `/audioset`: view and change audio settings at every scope.
pub mod audioset;
