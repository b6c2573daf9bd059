//! Basic example of driving the puzzle engines without a terminal host

use wordgrid_core::{Clue, Crossword, Position, WordSearch};

fn main() {
    // Build a tiny crossword: one open row, clues in both legacy shapes
    println!("--- Crossword ---\n");
    let grid = vec![vec![
        Some("C".to_string()),
        Some("A".to_string()),
        Some("T".to_string()),
    ]];
    let across = vec![Clue::Numbered {
        numero: Some(1),
        fila: Some(0),
        columna: Some(0),
        pista: "A small feline".to_string(),
    }];
    let down: Vec<Clue> = vec![];

    let mut crossword = Crossword::new(&grid, &across, &down).expect("non-empty grid");
    crossword.on_complete(|final_grid| {
        println!("Crossword complete: {:?}", final_grid);
    });

    for clue in crossword.across_clues() {
        println!("Across {}: {}", clue.number, clue.text);
    }

    // Type the answer; the cursor advances along the active axis
    crossword.select_cell(Position::new(0, 0));
    for ch in ['c', 'a', 't'] {
        crossword.type_letter(ch);
    }
    println!("Filled: {}", crossword.is_complete());

    // Build a word search and find both words by dragging
    println!("\n--- Word search ---\n");
    let letters: Vec<Vec<String>> = ["SOL", "AXX", "LXX"]
        .iter()
        .map(|row| row.chars().map(|ch| ch.to_string()).collect())
        .collect();
    let words = vec!["sol".to_string(), "sal".to_string()];

    let mut word_search = WordSearch::new(&letters, &words).expect("non-empty grid");
    word_search.on_complete(|found| {
        println!("Word search complete: {:?}", found);
    });

    // Horizontal drag
    word_search.begin_selection(Position::new(0, 0));
    word_search.extend_selection(Position::new(0, 2));
    if let Some(word) = word_search.end_selection() {
        println!("Found {}", word);
    }

    // Vertical drag, reversed
    word_search.begin_selection(Position::new(2, 0));
    word_search.extend_selection(Position::new(0, 0));
    if let Some(word) = word_search.end_selection() {
        println!("Found {}", word);
    }

    println!(
        "Found {}/{} words",
        word_search.found_count(),
        word_search.words().len()
    );
}
