use crate::error::{RenderError, RenderResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Query terms of a document: term -> whether it matched
///
/// Key order is the order the query engine reported the terms in and is kept
/// through (de)serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerms(IndexMap<String, bool>);

impl SearchTerms {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_term(mut self, term: &str, matched: bool) -> Self {
        self.0.insert(term.to_string(), matched);
        self
    }

    /// Terms that were part of the query but not found in the document
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, matched)| !**matched)
            .map(|(term, _)| term.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(term, matched)| (term.into(), matched)).collect())
    }
}

/// A scored document as produced by the query engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub location: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub terms: SearchTerms,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl SearchDocument {
    pub fn new(location: String, title: String, score: f64) -> Self {
        Self {
            location,
            title,
            text: String::new(),
            terms: SearchTerms::new(),
            score,
            tags: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    pub fn with_terms(mut self, terms: SearchTerms) -> Self {
        self.terms = terms;
        self
    }

    pub fn with_tag(mut self, tag: String) -> Self {
        self.tags.push(tag);
        self
    }

    /// Articles are addressed by a bare location, sections carry a `#` anchor
    pub fn is_article(&self) -> bool {
        !self.location.contains('#')
    }

    pub fn is_section(&self) -> bool {
        !self.is_article()
    }

    /// Link target with space-encoded `%20` rewritten to `+`
    pub fn href(&self) -> String {
        self.location.replace("%20", "+")
    }

    /// Score with exactly two decimals, ties rounded away from zero
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", (self.score * 100.0).round() / 100.0)
    }
}

/// All documents matched for one article, ordered by descending score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult {
    documents: Vec<SearchDocument>,
}

impl SearchResult {
    pub fn new(documents: Vec<SearchDocument>) -> Self {
        Self { documents }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchDocument> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Split the result into its article and the sections shown inline
    /// (`best`) or collapsed (`more`).
    ///
    /// The first section scoring strictly below `threshold` and everything after
    /// it goes to `more`. With an infinite threshold every finite score is below
    /// it, so all sections end up collapsed.
    pub fn partition(&self, threshold: f64) -> RenderResult<Partition<'_>> {
        let mut docs: Vec<&SearchDocument> = self.documents.iter().collect();

        let articles: Vec<usize> = docs
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.is_article())
            .map(|(i, _)| i)
            .collect();

        let parent = match articles.as_slice() {
            [parent] => *parent,
            [] => {
                return Err(RenderError::MissingArticle {
                    count: docs.len(),
                })
            }
            many => {
                let locations = many
                    .iter()
                    .map(|&i| docs[i].location.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(RenderError::MultipleArticles {
                    count: many.len(),
                    locations,
                });
            }
        };

        let article = docs.remove(parent);

        let index = docs
            .iter()
            .position(|doc| doc.score < threshold)
            .unwrap_or(docs.len());
        let more = docs.split_off(index);

        Ok(Partition {
            parent,
            article,
            best: docs,
            more,
        })
    }
}

impl From<Vec<SearchDocument>> for SearchResult {
    fn from(documents: Vec<SearchDocument>) -> Self {
        Self::new(documents)
    }
}

impl FromIterator<SearchDocument> for SearchResult {
    fn from_iter<I: IntoIterator<Item = SearchDocument>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a SearchDocument;
    type IntoIter = std::slice::Iter<'a, SearchDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A search result decomposed for rendering
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    /// Position of the article in the original result
    pub parent: usize,
    pub article: &'a SearchDocument,
    pub best: Vec<&'a SearchDocument>,
    pub more: Vec<&'a SearchDocument>,
}

impl Partition<'_> {
    /// The article keeps its teaser only when it ranked first and no section
    /// is shown inline.
    pub fn show_article_teaser(&self) -> bool {
        self.parent == 0 && self.best.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(location: &str, score: f64) -> SearchDocument {
        SearchDocument::new(location.to_string(), location.to_string(), score)
    }

    fn scores(docs: &[&SearchDocument]) -> Vec<f64> {
        docs.iter().map(|d| d.score).collect()
    }

    #[test]
    fn test_partition_with_threshold() -> anyhow::Result<()> {
        let result = SearchResult::from(vec![
            doc("page/", 1.0),
            doc("page/#a", 0.9),
            doc("page/#b", 0.7),
            doc("page/#c", 0.5),
            doc("page/#d", 0.3),
        ]);

        let partition = result.partition(0.6)?;
        assert_eq!(partition.parent, 0);
        assert_eq!(partition.article.location, "page/");
        assert_eq!(scores(&partition.best), vec![0.9, 0.7]);
        assert_eq!(scores(&partition.more), vec![0.5, 0.3]);
        assert!(!partition.show_article_teaser());

        Ok(())
    }

    #[test]
    fn test_partition_single_section_below_threshold() -> anyhow::Result<()> {
        let result = SearchResult::from(vec![doc("page/", 1.0), doc("page/#a", 0.4)]);

        let partition = result.partition(0.5)?;
        assert!(partition.best.is_empty());
        assert_eq!(scores(&partition.more), vec![0.4]);
        assert!(partition.show_article_teaser());

        Ok(())
    }

    #[test]
    fn test_infinite_threshold_collapses_every_section() -> anyhow::Result<()> {
        let result = SearchResult::from(vec![
            doc("page/", 5.0),
            doc("page/#a", 4.0),
            doc("page/#b", 3.0),
        ]);

        let partition = result.partition(f64::INFINITY)?;
        assert!(partition.best.is_empty());
        assert_eq!(scores(&partition.more), vec![4.0, 3.0]);

        Ok(())
    }

    #[test]
    fn test_article_not_ranked_first() -> anyhow::Result<()> {
        let result = SearchResult::from(vec![
            doc("page/#a", 2.0),
            doc("page/", 1.5),
            doc("page/#b", 1.0),
        ]);

        let partition = result.partition(0.5)?;
        assert_eq!(partition.parent, 1);
        assert_eq!(partition.article.location, "page/");
        assert!(partition.best.iter().all(|d| d.is_section()));
        assert_eq!(scores(&partition.best), vec![2.0, 1.0]);
        assert!(!partition.show_article_teaser());

        let partition = result.partition(f64::INFINITY)?;
        assert!(partition.best.is_empty());
        assert!(!partition.show_article_teaser());

        Ok(())
    }

    #[test]
    fn test_partition_rejects_malformed_results() {
        let none = SearchResult::from(vec![doc("page/#a", 1.0)]);
        assert_eq!(
            none.partition(0.5).unwrap_err(),
            RenderError::MissingArticle { count: 1 }
        );

        let empty = SearchResult::default();
        assert!(matches!(
            empty.partition(0.5),
            Err(RenderError::MissingArticle { count: 0 })
        ));

        let two = SearchResult::from(vec![doc("a/", 1.0), doc("b/", 0.5)]);
        match two.partition(0.5) {
            Err(RenderError::MultipleArticles { count, locations }) => {
                assert_eq!(count, 2);
                assert_eq!(locations, "a/, b/");
            }
            other => panic!("unexpected partition: {:?}", other),
        }
    }

    #[test]
    fn test_href_replaces_encoded_spaces() {
        let d = doc("guide/getting%20started/#first%20steps", 1.0);
        let href = d.href();
        assert_eq!(href, "guide/getting+started/#first+steps");
        assert_eq!(href.replace("%20", "+"), href);
    }

    #[test]
    fn test_formatted_score_rounds_ties_up() {
        assert_eq!(doc("p/", 0.125).formatted_score(), "0.13");
        assert_eq!(doc("p/", 0.375).formatted_score(), "0.38");
        assert_eq!(doc("p/", 1.5).formatted_score(), "1.50");
        assert_eq!(doc("p/", 0.0).formatted_score(), "0.00");
    }

    #[test]
    fn test_missing_terms_follow_key_order() {
        let terms = SearchTerms::new()
            .with_term("zeta", false)
            .with_term("alpha", true)
            .with_term("beta", false);

        let missing: Vec<&str> = terms.missing().collect();
        assert_eq!(missing, vec!["zeta", "beta"]);
    }

    #[test]
    fn test_deserialize_keeps_term_order() -> anyhow::Result<()> {
        let json = r#"[
            {"location": "page/", "title": "Page", "score": 1.234,
             "terms": {"zeta": false, "alpha": false, "mid": true}}
        ]"#;

        let result: SearchResult = serde_json::from_str(json)?;
        let first = result.iter().next().expect("one document");
        assert_eq!(first.text, "");
        assert_eq!(first.formatted_score(), "1.23");
        assert_eq!(first.terms.missing().collect::<Vec<_>>(), vec!["zeta", "alpha"]);

        Ok(())
    }
}
