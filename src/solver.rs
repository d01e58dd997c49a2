//! An agent to play m-in-a-row games perfectly

use rayon::prelude::*;
use tracing::{debug, info};

use std::sync::Arc;

use crate::board::{Board, Player};
use crate::error::{Error, Precondition, Result};
use crate::lines::WinningLines;
use crate::{DEPTH_PER_SIDE, WIN_SCORE};

/// Stands in for an infinite score when opening the search window
pub const SCORE_BOUND: i32 = i32::MAX;

/// Limits and scoring used by a [`Solver`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    /// Score of a win at depth 0, reduced by one for every ply it lies deeper
    pub win_score: i32,
    /// Plies below the root after which a position is scored as a draw
    pub max_depth: usize,
    /// Whether alpha-beta cutoffs are taken
    pub pruning: bool,
}

impl SearchConfig {
    /// The default limits for a `size`×`size` board
    pub fn for_size(size: usize) -> Self {
        Self {
            win_score: WIN_SCORE,
            max_depth: DEPTH_PER_SIDE * size,
            pruning: true,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self> {
        if max_depth as i64 >= self.win_score as i64 {
            return Err(Error::InvalidConfig(format!(
                "maximum depth {} must be below the win score {}",
                max_depth, self.win_score
            )));
        }
        self.max_depth = max_depth;
        Ok(self)
    }

    /// Visits every node, the result is unchanged
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }
}

/// An agent to find the best move in any position
///
/// # Position Scoring
/// Scores are seen from the solver's player. A win for the solver found `d` plies
/// below the root move scores `win_score - d`, a loss scores `d - win_score`, so
/// quicker wins and slower losses are preferred. Draws, and positions beyond the
/// depth limit, score 0.
#[derive(Clone)]
pub struct Solver {
    lines: Arc<WinningLines>,
    player: Player,
    config: SearchConfig,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a `Solver` playing as `player` with the default limits for the
    /// board the lines were generated for
    pub fn new<L: Into<Arc<WinningLines>>>(lines: L, player: Player) -> Self {
        let lines = lines.into();
        let config = SearchConfig::for_size(lines.size());
        Self::with_config(lines, player, config)
    }

    pub fn with_config<L: Into<Arc<WinningLines>>>(
        lines: L,
        player: Player,
        config: SearchConfig,
    ) -> Self {
        Self {
            lines: lines.into(),
            player,
            config,
            node_count: 0,
        }
    }

    /// The line set this solver searches with, shared between clones
    pub fn lines(&self) -> &Arc<WinningLines> {
        &self.lines
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Scores `board` by minimax search
    ///
    /// `maximizing` is true when the solver's player is to move. Every
    /// speculative move is undone before returning, so `board` is unchanged.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        depth: usize,
    ) -> Result<i32> {
        self.lines.check_board(board)?;
        Ok(self.search(board, alpha, beta, maximizing, depth))
    }

    fn search(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        depth: usize,
    ) -> i32 {
        self.node_count += 1;

        let winner = self.lines.winner(board);
        if winner == self.player.cell() {
            return self.config.win_score - depth as i32;
        } else if winner == self.player.opponent().cell() {
            return depth as i32 - self.config.win_score;
        }

        if depth >= self.config.max_depth || board.is_full() {
            return 0;
        }

        if maximizing {
            let mark = self.player.cell();
            let mut best = -SCORE_BOUND;
            for index in 0..board.len() {
                if !board.cells()[index].is_empty() {
                    continue;
                }
                let score = {
                    let mut placed = board.speculate(index, mark);
                    self.search(&mut placed, alpha, beta, false, depth + 1)
                };
                best = best.max(score);
                alpha = alpha.max(best);
                // the opponent already has a better option elsewhere
                if self.config.pruning && best >= beta {
                    break;
                }
            }
            best
        } else {
            let mark = self.player.opponent().cell();
            let mut best = SCORE_BOUND;
            for index in 0..board.len() {
                if !board.cells()[index].is_empty() {
                    continue;
                }
                let score = {
                    let mut placed = board.speculate(index, mark);
                    self.search(&mut placed, alpha, beta, true, depth + 1)
                };
                best = best.min(score);
                beta = beta.min(best);
                if self.config.pruning && best <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Finds the best move for the solver's player and plays it on `board`
    ///
    /// Returns the score of the position (see [Position Scoring]) and the
    /// index of the chosen cell. Equal scores go to the lowest index.
    ///
    /// [Position Scoring]: #position-scoring
    pub fn best_move(&mut self, board: &mut Board) -> Result<(i32, usize)> {
        let (score, index) = self.evaluate(board)?;
        board.play_checked(index, self.player)?;
        Ok((score, index))
    }

    /// Finds the best move and its score without playing it
    pub fn evaluate(&mut self, board: &mut Board) -> Result<(i32, usize)> {
        self.check_searchable(board)?;
        self.node_count = 0;

        let mark = self.player.cell();
        let mut best: Option<(i32, usize)> = None;
        for index in 0..board.len() {
            if !board.cells()[index].is_empty() {
                continue;
            }
            let score = {
                let mut placed = board.speculate(index, mark);
                self.search(&mut placed, -SCORE_BOUND, SCORE_BOUND, false, 0)
            };
            debug!(index, score, "scored root move");
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, index));
            }
        }

        let (score, index) = best.ok_or(Error::PreconditionViolation(Precondition::BoardFull))?;
        info!(player = %self.player, index, score, nodes = self.node_count, "chose move");
        Ok((score, index))
    }

    /// Same as [`Solver::best_move`], scoring each root move on its own thread
    /// and board copy
    pub fn best_move_parallel(&mut self, board: &mut Board) -> Result<(i32, usize)> {
        self.check_searchable(board)?;

        let mark = self.player.cell();
        let mut template = self.clone();
        template.node_count = 0;

        let candidates: Vec<usize> = board.empty_cells().collect();
        let root: &Board = board;
        let scored: Vec<(i32, usize, usize)> = candidates
            .par_iter()
            .map(|&index| {
                let mut solver = template.clone();
                let mut branch = root.clone();
                let score = {
                    let mut placed = branch.speculate(index, mark);
                    solver.search(&mut placed, -SCORE_BOUND, SCORE_BOUND, false, 0)
                };
                (score, index, solver.node_count)
            })
            .collect();

        self.node_count = scored.iter().map(|&(_, _, nodes)| nodes).sum();
        let mut best: Option<(i32, usize)> = None;
        for &(score, index, _) in scored.iter() {
            debug!(index, score, "scored root move");
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, index));
            }
        }

        let (score, index) = best.ok_or(Error::PreconditionViolation(Precondition::BoardFull))?;
        info!(player = %self.player, index, score, nodes = self.node_count, "chose move");
        board.play_checked(index, self.player)?;
        Ok((score, index))
    }

    /// Converts a score into the number of plies, counting the move being
    /// chosen, until the forced win or loss. Draws give `None`.
    pub fn plies_to_result(&self, score: i32) -> Option<usize> {
        if score == 0 {
            None
        } else {
            Some((self.config.win_score - score.abs()) as usize + 1)
        }
    }

    fn check_searchable(&self, board: &Board) -> Result<()> {
        self.lines.check_board(board)?;
        if let Some(player) = self.lines.winner(board).player() {
            return Err(Error::PreconditionViolation(Precondition::AlreadyWon(player)));
        }
        if board.is_full() {
            return Err(Error::PreconditionViolation(Precondition::BoardFull));
        }
        Ok(())
    }
}

impl std::ops::Deref for Solver {
    type Target = WinningLines;

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

/// Plays the best move for `Player::O` on `board` and returns its index
pub fn best_move(board: &mut Board, lines: &Arc<WinningLines>) -> Result<usize> {
    let mut solver = Solver::new(Arc::clone(lines), Player::O);
    let (_, index) = solver.best_move(board)?;
    Ok(index)
}
