use crate::Position;
use serde::{Deserialize, Serialize};

/// A crossword clue as it appears in exam content.
///
/// Two legacy shapes are in circulation: plain strings, implicitly numbered
/// by list position, and structured records with an explicit number and an
/// anchor cell. Both keep working; engines normalize them on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Clue {
    Numbered {
        #[serde(default)]
        numero: Option<u32>,
        #[serde(default)]
        fila: Option<usize>,
        #[serde(default)]
        columna: Option<usize>,
        pista: String,
    },
    Plain(String),
}

/// A clue normalized for display and anchoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueEntry {
    /// Display number; 1-based list position when the source had none
    pub number: u32,
    /// Cell where the answer starts, when the source carried coordinates
    pub anchor: Option<Position>,
    /// Clue text
    pub text: String,
}

/// Normalize a legacy clue list to a single internal representation
pub fn normalize_clues(clues: &[Clue]) -> Vec<ClueEntry> {
    clues
        .iter()
        .enumerate()
        .map(|(i, clue)| match clue {
            Clue::Plain(text) => ClueEntry {
                number: i as u32 + 1,
                anchor: None,
                text: text.clone(),
            },
            Clue::Numbered {
                numero,
                fila,
                columna,
                pista,
            } => ClueEntry {
                number: numero.unwrap_or(i as u32 + 1),
                anchor: match (fila, columna) {
                    (Some(f), Some(c)) => Some(Position::new(*f, *c)),
                    _ => None,
                },
                text: pista.clone(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_both_shapes() {
        let json = r#"["capital of France", {"numero": 3, "fila": 1, "columna": 2, "pista": "opposite of down"}]"#;
        let clues: Vec<Clue> = serde_json::from_str(json).unwrap();

        assert_eq!(clues[0], Clue::Plain("capital of France".to_string()));
        assert_eq!(
            clues[1],
            Clue::Numbered {
                numero: Some(3),
                fila: Some(1),
                columna: Some(2),
                pista: "opposite of down".to_string(),
            }
        );
    }

    #[test]
    fn test_plain_clues_numbered_by_position() {
        let clues = vec![
            Clue::Plain("first".to_string()),
            Clue::Plain("second".to_string()),
        ];
        let entries = normalize_clues(&clues);

        assert_eq!(entries[0].number, 1);
        assert_eq!(entries[1].number, 2);
        assert_eq!(entries[0].anchor, None);
        assert_eq!(entries[1].text, "second");
    }

    #[test]
    fn test_numbered_clue_keeps_number_and_anchor() {
        let clues = vec![Clue::Numbered {
            numero: Some(7),
            fila: Some(2),
            columna: Some(4),
            pista: "seven".to_string(),
        }];
        let entries = normalize_clues(&clues);

        assert_eq!(entries[0].number, 7);
        assert_eq!(entries[0].anchor, Some(Position::new(2, 4)));
    }

    #[test]
    fn test_numbered_clue_without_number_falls_back_to_position() {
        let json = r#"[{"pista": "anonymous"}]"#;
        let clues: Vec<Clue> = serde_json::from_str(json).unwrap();
        let entries = normalize_clues(&clues);

        assert_eq!(entries[0].number, 1);
        assert_eq!(entries[0].anchor, None);
        assert_eq!(entries[0].text, "anonymous");
    }
}
