use crate::commands::{Args, CommandModule, HandlerOutput, MethodSpec, ParamSpec};
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

pub const MAX_DICE: i64 = 100;
pub const MAX_SIDES: i64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("dice count must be between 1 and {MAX_DICE}, got {0}")]
    Count(i64),
    #[error("dice must have between 2 and {MAX_SIDES} sides, got {0}")]
    Sides(i64),
}

/// Dice roller.
#[derive(Default)]
pub struct Dice;

impl Dice {
    fn roll(&self, args: &Args) -> HandlerOutput {
        let count = args.integer(0)?;
        let sides = args.integer(1)?;
        let rolls = roll_dice(count, sides)?;
        let total: i64 = rolls.iter().sum();
        Ok(Some(json!({
            "content": format!("{count}d{sides}: {total}"),
            "rolls": rolls,
            "total": total,
        })))
    }
}

fn roll_dice(count: i64, sides: i64) -> Result<Vec<i64>, DiceError> {
    if !(1..=MAX_DICE).contains(&count) {
        return Err(DiceError::Count(count));
    }
    if !(2..=MAX_SIDES).contains(&sides) {
        return Err(DiceError::Sides(sides));
    }
    let mut rng = rand::thread_rng();
    Ok((0..count).map(|_| rng.gen_range(1..=sides)).collect())
}

impl CommandModule for Dice {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![MethodSpec::new("roll")
            .command("roll", "Roll some dice")
            .param(ParamSpec::new::<i64>("count").describe("How many dice"))
            .param(ParamSpec::new::<i64>("sides").describe("Sides per die"))
            .handler(|dice: Arc<Self>, args| async move { dice.roll(&args) })]
    }
}
