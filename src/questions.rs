//! Question bank: the six memory questions, in presentation order.

/// One multiple-choice question. `correct` indexes into `options`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizItem {
    pub image: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

pub const OPTION_COUNT: usize = 4;

pub const QUIZ_ITEMS: &[QuizItem] = &[
    QuizItem {
        image: "images/memory1.jpg",
        prompt: "Où avons-nous eu notre premier rendez-vous ?",
        options: ["Au cinéma", "Au restaurant", "Dans un parc", "À la plage"],
        correct: 1,
    },
    QuizItem {
        image: "images/memory2.jpg",
        prompt: "Quel est mon plat préféré ?",
        options: ["Pizza", "Sushi", "Pâtes", "Burger"],
        correct: 2,
    },
    QuizItem {
        image: "images/memory3.jpg",
        prompt: "Quelle est notre chanson ?",
        options: [
            "Perfect - Ed Sheeran",
            "All of Me - John Legend",
            "Thinking Out Loud - Ed Sheeran",
            "A Thousand Years - Christina Perri",
        ],
        correct: 0,
    },
    QuizItem {
        image: "images/memory4.jpg",
        prompt: "Quel est mon film préféré ?",
        options: ["Titanic", "Notebook", "La La Land", "Before Sunrise"],
        correct: 1,
    },
    QuizItem {
        image: "images/memory5.jpg",
        prompt: "Quelle est ma couleur préférée ?",
        options: ["Bleu", "Rose", "Vert", "Rouge"],
        correct: 1,
    },
    QuizItem {
        image: "images/memory6.jpg",
        prompt: "Quel est mon rêve ?",
        options: [
            "Voyager autour du monde",
            "Avoir une grande maison",
            "Devenir célèbre",
            "Avoir une famille",
        ],
        correct: 0,
    },
];

const PRIMARY_EXT: &str = ".jpg";
const FALLBACK_EXT: &str = ".png";

/// Alternate path to try after `src` failed to load. Only `.jpg` sources get
/// a fallback, so the `.png` retry itself never produces another one.
pub fn fallback_image(src: &str) -> Option<String> {
    src.strip_suffix(PRIMARY_EXT)
        .map(|stem| format!("{stem}{FALLBACK_EXT}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_indices_match_shipped_answers() {
        let correct: Vec<usize> = QUIZ_ITEMS.iter().map(|q| q.correct).collect();
        assert_eq!(correct, vec![1, 2, 0, 1, 1, 0]);
    }

    #[test]
    fn fallback_swaps_jpg_once() {
        let first = fallback_image("http://host/images/memory1.jpg").unwrap();
        assert_eq!(first, "http://host/images/memory1.png");
        assert_eq!(fallback_image(&first), None);
        assert_eq!(fallback_image("images/memory1.gif"), None);
    }
}
