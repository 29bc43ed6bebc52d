//! Arithmetic challenges.
//!
//! Operands are constrained so every expression is easy to solve mentally:
//! subtraction never goes negative, multiplication stays small, and division
//! is built backwards from the quotient so it is always exact.

use crate::config::{CaptchaError, Result};
use crate::content::{CaptchaContent, ContentGenerator};
use rand::{Rng, RngCore};
use std::fmt;

const DEFAULT_MAX_OPERAND: u32 = 10;

/// The four supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }
}

/// A generated expression `lhs op rhs` and its exact result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    pub lhs: u64,
    pub op: Operator,
    pub rhs: u64,
    pub result: u64,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Generates `a op b = ?` challenges whose answer is the numeric result.
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticGenerator {
    max_operand: u64,
}

impl Default for ArithmeticGenerator {
    fn default() -> Self {
        Self {
            max_operand: u64::from(DEFAULT_MAX_OPERAND),
        }
    }
}

impl ArithmeticGenerator {
    /// Creates a generator with operands drawn from `1..=max_operand`.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `max_operand` is less than 2.
    pub fn new(max_operand: u32) -> Result<Self> {
        if max_operand < 2 {
            return Err(CaptchaError::config("max operand must be at least 2"));
        }
        Ok(Self {
            max_operand: u64::from(max_operand),
        })
    }

    #[must_use]
    pub const fn max_operand(&self) -> u64 {
        self.max_operand
    }

    /// Picks an operator uniformly and builds an expression for it.
    pub fn expression(&self, rng: &mut dyn RngCore) -> Expression {
        let op = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
        self.expression_for(op, rng)
    }

    /// Builds an expression for a specific operator.
    pub fn expression_for(&self, op: Operator, rng: &mut dyn RngCore) -> Expression {
        match op {
            Operator::Add => self.addition(rng),
            Operator::Subtract => self.subtraction(rng),
            Operator::Multiply => self.multiplication(rng),
            Operator::Divide => self.division(rng),
        }
    }

    fn addition(&self, rng: &mut dyn RngCore) -> Expression {
        let lhs = rng.random_range(1..=self.max_operand);
        let rhs = rng.random_range(1..=self.max_operand);
        Expression {
            lhs,
            op: Operator::Add,
            rhs,
            result: lhs + rhs,
        }
    }

    fn subtraction(&self, rng: &mut dyn RngCore) -> Expression {
        let mut lhs = rng.random_range(1..=self.max_operand);
        let mut rhs = rng.random_range(1..=self.max_operand);
        if lhs < rhs {
            std::mem::swap(&mut lhs, &mut rhs);
        }
        Expression {
            lhs,
            op: Operator::Subtract,
            rhs,
            result: lhs - rhs,
        }
    }

    fn multiplication(&self, rng: &mut dyn RngCore) -> Expression {
        let bound = self.small_bound();
        let lhs = rng.random_range(0..=bound);
        let rhs = rng.random_range(0..=bound);
        Expression {
            lhs,
            op: Operator::Multiply,
            rhs,
            result: lhs * rhs,
        }
    }

    fn division(&self, rng: &mut dyn RngCore) -> Expression {
        let bound = self.small_bound();
        let limit = self.max_operand * 2;
        // quotient 0 is always accepted, so this terminates.
        loop {
            let divisor = rng.random_range(2..=self.max_operand);
            let quotient = rng.random_range(0..=bound);
            let dividend = divisor * quotient;
            if dividend <= limit {
                return Expression {
                    lhs: dividend,
                    op: Operator::Divide,
                    rhs: divisor,
                    result: quotient,
                };
            }
        }
    }

    const fn small_bound(&self) -> u64 {
        self.max_operand / 2 + 1
    }
}

impl ContentGenerator for ArithmeticGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> CaptchaContent {
        let expression = self.expression(rng);
        CaptchaContent::new(expression.result.to_string(), expression.to_string())
    }
}
