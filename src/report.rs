use std::io::Write;

use itertools::Itertools;

use crate::domain::Domain;
use crate::path::Solution;
use crate::search::Strategy;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Format {
    Actions,
    Trace,
}

impl Format {
    pub fn default_for(domain: Domain) -> Format {
        match domain {
            Domain::SingleBlank => Format::Actions,
            Domain::MultiBlank => Format::Trace,
        }
    }
}

pub fn write_solution(out: &mut impl Write, format: Format, solution: &Solution) -> std::io::Result<()> {
    match format {
        Format::Actions => write_actions(out, solution),
        Format::Trace => write_trace(out, solution),
    }
}

// single-blank actions print as bare directions, multi-blank ones also name
// the blank that moved
fn write_actions(out: &mut impl Write, solution: &Solution) -> std::io::Result<()> {
    writeln!(out, "{}:", solution.strategy.label())?;
    writeln!(out, "Expanded nodes: {}", solution.stats.expanded())?;
    writeln!(out, "Path cost: {}", solution.path_cost)?;

    let actions = solution.actions.iter().format_with(", ", |action, f| match solution.domain {
        Domain::SingleBlank => f(&format_args!("'{}'", action.direction)),
        Domain::MultiBlank => f(&format_args!("'{}'", action)),
    });
    writeln!(out, "Actions: [{}]", actions)
}

fn write_trace(out: &mut impl Write, solution: &Solution) -> std::io::Result<()> {
    writeln!(out, "States:")?;
    for board in solution.boards() {
        writeln!(out, "{}", board.grid())?;
    }

    writeln!(out, "Path Cost: {}", solution.path_cost)?;
    writeln!(out, "Expanded Nodes: {}", solution.stats.expanded())
}

/// Reports a run whose frontier emptied without reaching the goal.
pub fn write_failure(out: &mut impl Write, strategy: Strategy, expanded: usize) -> std::io::Result<()> {
    writeln!(out, "{}:", strategy.label())?;
    writeln!(out, "Expanded nodes: {}", expanded)?;
    writeln!(out, "No solution found")
}
