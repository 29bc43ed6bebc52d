use kaptcha::{ArithmeticGenerator, CharGenerator, ContentGenerator, Operator};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn parse_expression(text: &str) -> (u64, String, u64) {
    let parts: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(parts.len(), 5, "unexpected expression: {text}");
    assert_eq!(parts[3], "=");
    assert_eq!(parts[4], "?");
    (
        parts[0].parse().unwrap(),
        parts[1].to_string(),
        parts[2].parse().unwrap(),
    )
}

#[test]
fn test_char_generator_answers() {
    let generator = CharGenerator::new(4).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let content = generator.generate(&mut rng);
        assert_eq!(content.answer().chars().count(), 4);
        assert_eq!(content.answer(), content.draw_text());
        assert!(content.answer().chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn test_arithmetic_answers_are_correct() {
    let generator = ArithmeticGenerator::new(10).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let mut seen = Vec::new();

    for _ in 0..2000 {
        let content = generator.generate(&mut rng);
        let (lhs, symbol, rhs) = parse_expression(content.draw_text());
        let answer: u64 = content.answer().parse().unwrap();

        let expected = match symbol.as_str() {
            "+" => {
                assert!(lhs <= 10 && rhs <= 10);
                lhs + rhs
            }
            "-" => {
                assert!(lhs >= rhs, "negative result in {}", content.draw_text());
                lhs - rhs
            }
            "×" => lhs * rhs,
            "÷" => {
                assert!(rhs > 0);
                assert!(lhs <= 20);
                assert_eq!(lhs % rhs, 0, "inexact division in {}", content.draw_text());
                lhs / rhs
            }
            other => panic!("unexpected operator {other}"),
        };
        assert_eq!(answer, expected);

        if !seen.contains(&symbol) {
            seen.push(symbol);
        }
    }

    assert_eq!(seen.len(), Operator::ALL.len());
}

#[test]
fn test_generator_validation() {
    assert!(CharGenerator::new(0).is_err());
    assert!(ArithmeticGenerator::new(0).is_err());
    assert!(ArithmeticGenerator::new(1).is_err());
    assert!(ArithmeticGenerator::new(2).is_ok());
}
