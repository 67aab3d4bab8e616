//! Long help text constants for CLI subcommands.
//!
//! Kept out of `cli.rs` so the argument definitions stay short.

/// Reply-weighted communication graph over a channel export.
pub const GRAPH: &str = "\
Build a weighted communication graph from a chat workspace export.

Every reply in a thread started by an included person adds weight to the
pair (thread author, replier):

  weight = words in the thread's root message + words in the reply

A reply's words are found by looking up its timestamp among the messages
of the same export file (--match-scope file) or channel (--match-scope
channel). Words are counted by splitting on single spaces.

Two edge lists are written to the output directory:
  people.csv       name,talks to,word count
  departments.csv  department,talks to,word count

Anyone who takes part in a thread, as author or as replier, can be
paired. A pair is kept when either direction alone exceeds --min-words;
the written weight is the sum of both directions. A negative
--min-words keeps every pair.

Included people are the active users found in the org chart by email,
minus the emails in the ignore list. Settings come from talkgraph.toml,
then OBFUSCATE_NAMES and MINIMUM_WORD_COUNT, then these flags.

Examples:
  tg graph                             # ./data in, ./output out
  tg graph --data-dir export --since 6m
  tg graph --min-words 250 --obfuscate
  tg graph --exclude-channel 'bots-*' --exclude-channel random
  tg graph --json                      # all pairs, machine-readable";

/// Resolved identity table.
pub const DIRECTORY: &str = "\
List every user in the directory export with the department found for
them in the org chart and whether their threads seed the graph.

Statuses:
  included          in the org chart and not ignored
  ignored           listed in the ignore file
  not in org chart  active user with no matching email row
  deleted, bot, restricted, ultra-restricted
                    never named or scored

Examples:
  tg directory
  tg directory --included-only --json";
