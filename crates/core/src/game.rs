// Rock-paper-scissors round used by the game_time tool

use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// The one hand this hand beats in the cycle.
    pub fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Paper => Hand::Rock,
            Hand::Scissors => Hand::Paper,
        }
    }

    /// Display label, emoji included, matching the response format.
    pub fn label(self) -> &'static str {
        match self {
            Hand::Rock => "🪨 Rock",
            Hand::Paper => "📄 Paper",
            Hand::Scissors => "✂️ Scissors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Draw,
    AgentWins,
    PlayerWins,
}

impl Outcome {
    /// Deterministic outcome of a round, from the player's perspective.
    pub fn decide(agent: Hand, player: Hand) -> Self {
        if agent == player {
            Outcome::Draw
        } else if agent.beats() == player {
            Outcome::AgentWins
        } else {
            Outcome::PlayerWins
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Draw => "It's a draw! 😐",
            Outcome::AgentWins => "The AI wins... 😅",
            Outcome::PlayerWins => "You win! 🎉",
        }
    }
}

/// One round: both parties draw independently and uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub agent: Hand,
    pub player: Hand,
    pub outcome: Outcome,
}

impl Round {
    pub fn play() -> Self {
        let mut rng = rand::rng();
        let agent = *Hand::ALL.choose(&mut rng).unwrap_or(&Hand::Rock);
        let player = *Hand::ALL.choose(&mut rng).unwrap_or(&Hand::Rock);
        Self {
            agent,
            player,
            outcome: Outcome::decide(agent, player),
        }
    }
}
