// src/store.rs
//
// Owned, in-memory knowledge base. Screens hold a reference to a single
// instance and every write goes through `apply`, so there is exactly one
// source of truth for the FAQ list.

use crate::constants::{seed_categories, seed_faqs, UNRESOLVED_CATEGORY_LABEL};
use crate::errors::{GitoError, GitoResult};
use crate::models::{Category, FaqEntry};

/// A single mutation against the knowledge base.
#[derive(Debug, Clone)]
pub enum FaqChange {
    Create {
        category_id: String,
        question: String,
        answer: String,
    },
    Update {
        id: String,
        category_id: String,
        question: String,
        answer: String,
    },
    Delete {
        id: String,
    },
    /// Bumps the view counter when an entry is displayed.
    RecordView {
        id: String,
    },
}

#[derive(Debug)]
pub struct KnowledgeBase {
    faqs: Vec<FaqEntry>,
    categories: Vec<Category>,
}

impl KnowledgeBase {
    /// Empty knowledge base, mainly for tests.
    pub fn new(categories: Vec<Category>) -> Self {
        KnowledgeBase {
            faqs: Vec::new(),
            categories,
        }
    }

    /// Knowledge base preloaded with the shipped UCM-FEG content.
    pub fn seeded() -> Self {
        KnowledgeBase {
            faqs: seed_faqs(),
            categories: seed_categories(),
        }
    }

    /// Insertion order is display order for every listing.
    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn faq(&self, id: &str) -> Option<&FaqEntry> {
        self.faqs.iter().find(|f| f.id == id)
    }

    /// Resolves a category id to its name. Dangling references are tolerated
    /// and simply produce `None`.
    pub fn category_name(&self, category_id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.as_str())
    }

    /// Display label for listings: "N/A" when the category is unresolved.
    pub fn category_label(&self, category_id: &str) -> &str {
        self.category_name(category_id)
            .unwrap_or(UNRESOLVED_CATEGORY_LABEL)
    }

    /// Sole mutation entry point.
    pub fn apply(&mut self, change: FaqChange) -> GitoResult<()> {
        match change {
            FaqChange::Create {
                category_id,
                question,
                answer,
            } => {
                if question.trim().is_empty() || answer.trim().is_empty() {
                    return Err(GitoError::store_error(
                        "Por favor, preencha todos os campos obrigatórios.",
                    ));
                }
                self.faqs.push(FaqEntry::new(category_id, question, answer));
                Ok(())
            }
            FaqChange::Update {
                id,
                category_id,
                question,
                answer,
            } => {
                if question.trim().is_empty() || answer.trim().is_empty() {
                    return Err(GitoError::store_error(
                        "Por favor, preencha todos os campos obrigatórios.",
                    ));
                }
                let entry = self
                    .faqs
                    .iter_mut()
                    .find(|f| f.id == id)
                    .ok_or_else(|| GitoError::store_error(format!("FAQ não encontrada: {}", id)))?;
                entry.category_id = category_id;
                entry.question = question;
                entry.answer = answer;
                Ok(())
            }
            FaqChange::Delete { id } => {
                let before = self.faqs.len();
                self.faqs.retain(|f| f.id != id);
                if self.faqs.len() == before {
                    return Err(GitoError::store_error(format!("FAQ não encontrada: {}", id)));
                }
                Ok(())
            }
            FaqChange::RecordView { id } => {
                let entry = self
                    .faqs
                    .iter_mut()
                    .find(|f| f.id == id)
                    .ok_or_else(|| GitoError::store_error(format!("FAQ não encontrada: {}", id)))?;
                entry.views = entry.views.saturating_add(1);
                Ok(())
            }
        }
    }

    /// Case-insensitive filter over question, answer and category name, used
    /// by the admin manager search box.
    pub fn search(&self, term: &str) -> Vec<&FaqEntry> {
        let term = term.to_lowercase();
        self.faqs
            .iter()
            .filter(|f| {
                f.question.to_lowercase().contains(&term)
                    || f.answer.to_lowercase().contains(&term)
                    || self
                        .category_name(&f.category_id)
                        .map(|name| name.to_lowercase().contains(&term))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Entries of one category, in insertion order.
    pub fn by_category(&self, category_id: &str) -> Vec<&FaqEntry> {
        self.faqs
            .iter()
            .filter(|f| f.category_id == category_id)
            .collect()
    }

    /// Most-viewed entries, capped at `limit`.
    pub fn popular(&self, limit: usize) -> Vec<&FaqEntry> {
        let mut entries: Vec<&FaqEntry> = self.faqs.iter().collect();
        entries.sort_by(|a, b| b.views.cmp(&a.views));
        entries.truncate(limit);
        entries
    }

    pub fn total_views(&self) -> u64 {
        self.faqs.iter().map(|f| f.views).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new(vec![
            Category::new("1", "Matrículas", "Processo de matrículas."),
            Category::new("2", "Propinas", "Pagamentos."),
        ]);
        kb.apply(FaqChange::Create {
            category_id: "1".to_string(),
            question: "Quais os prazos de matrícula?".to_string(),
            answer: "Início em Janeiro.".to_string(),
        })
        .unwrap();
        kb.apply(FaqChange::Create {
            category_id: "2".to_string(),
            question: "Como pagar propinas?".to_string(),
            answer: "Na tesouraria.".to_string(),
        })
        .unwrap();
        kb
    }

    #[test]
    fn test_create_preserves_insertion_order() {
        let kb = test_base();
        assert_eq!(kb.faqs().len(), 2);
        assert_eq!(kb.faqs()[0].question, "Quais os prazos de matrícula?");
        assert_eq!(kb.faqs()[1].question, "Como pagar propinas?");
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let mut kb = test_base();
        let result = kb.apply(FaqChange::Create {
            category_id: "1".to_string(),
            question: "   ".to_string(),
            answer: "resposta".to_string(),
        });
        assert!(result.is_err());
        assert_eq!(kb.faqs().len(), 2);
    }

    #[test]
    fn test_update_edits_in_place() {
        let mut kb = test_base();
        let id = kb.faqs()[0].id.clone();
        kb.apply(FaqChange::Update {
            id: id.clone(),
            category_id: "2".to_string(),
            question: "Nova pergunta?".to_string(),
            answer: "Nova resposta.".to_string(),
        })
        .unwrap();
        let entry = kb.faq(&id).unwrap();
        assert_eq!(entry.question, "Nova pergunta?");
        assert_eq!(entry.category_id, "2");
        // Position in the listing does not change on edit.
        assert_eq!(kb.faqs()[0].id, id);
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut kb = test_base();
        let id = kb.faqs()[0].id.clone();
        kb.apply(FaqChange::Delete { id: id.clone() }).unwrap();
        assert_eq!(kb.faqs().len(), 1);
        assert!(kb.faq(&id).is_none());
        assert!(kb.apply(FaqChange::Delete { id }).is_err());
    }

    #[test]
    fn test_record_view_increments() {
        let mut kb = test_base();
        let id = kb.faqs()[0].id.clone();
        assert_eq!(kb.faq(&id).unwrap().views, 0);
        kb.apply(FaqChange::RecordView { id: id.clone() }).unwrap();
        kb.apply(FaqChange::RecordView { id: id.clone() }).unwrap();
        assert_eq!(kb.faq(&id).unwrap().views, 2);
        assert_eq!(kb.total_views(), 2);
    }

    #[test]
    fn test_dangling_category_renders_as_na() {
        let mut kb = test_base();
        kb.apply(FaqChange::Create {
            category_id: "999".to_string(),
            question: "Órfã?".to_string(),
            answer: "Sim.".to_string(),
        })
        .unwrap();
        let entry = kb.faqs().last().unwrap();
        assert!(kb.category_name(&entry.category_id).is_none());
        assert_eq!(kb.category_label(&entry.category_id), "N/A");
    }

    #[test]
    fn test_search_matches_question_answer_and_category() {
        let kb = test_base();
        assert_eq!(kb.search("prazos").len(), 1);
        assert_eq!(kb.search("TESOURARIA").len(), 1);
        // "Propinas" matches the category name of the second entry and the
        // question text of the same entry only once.
        assert_eq!(kb.search("propinas").len(), 1);
        assert_eq!(kb.search("xyzzy").len(), 0);
    }

    #[test]
    fn test_popular_sorts_by_views() {
        let mut kb = test_base();
        let second = kb.faqs()[1].id.clone();
        for _ in 0..3 {
            kb.apply(FaqChange::RecordView { id: second.clone() }).unwrap();
        }
        let popular = kb.popular(10);
        assert_eq!(popular[0].id, second);
    }

    #[test]
    fn test_seeded_base_matches_shipped_content() {
        let kb = KnowledgeBase::seeded();
        assert_eq!(kb.categories().len(), 5);
        assert_eq!(kb.faqs().len(), 7);
        assert_eq!(kb.category_label("3"), "Calendário Académico");
    }
}
