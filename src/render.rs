use crate::document::{SearchDocument, SearchResult, SearchTerms};
use crate::error::RenderResult;
use crate::markup::{Element, Node};
use crate::translation::{TranslationKey, Translator, Translations};
use crate::truncate::{Truncator, WordBoundaryTruncator};

/// Maximum teaser length in characters
pub const TEASER_LENGTH: usize = 320;

/// Renders scored search results into list-item markup
pub struct ResultRenderer<T = Translations, U = WordBoundaryTruncator> {
    translator: T,
    truncator: U,
    teaser_length: usize,
    threshold: Option<f64>,
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(Translations::new(), WordBoundaryTruncator::new())
    }
}

impl<T: Translator, U: Truncator> ResultRenderer<T, U> {
    pub fn new(translator: T, truncator: U) -> Self {
        Self {
            translator,
            truncator,
            teaser_length: TEASER_LENGTH,
            threshold: None,
        }
    }

    pub fn with_teaser_length(mut self, teaser_length: usize) -> Self {
        self.teaser_length = teaser_length;
        self
    }

    /// Threshold used when a caller does not pass one
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// One `<del>` per missing term, separated by single spaces
    pub fn missing_terms(&self, terms: &SearchTerms) -> Vec<Node> {
        let mut fragments: Vec<Node> = terms
            .missing()
            .flat_map(|term| [Node::from(Element::new("del").text(term)), Node::text(" ")])
            .collect();

        // drop the trailing separator
        fragments.pop();
        fragments
    }

    /// The article a result belongs to
    pub fn render_article_document(&self, doc: &SearchDocument, teaser: bool) -> Element {
        let article = Element::new("article")
            .class("md-search-result__article md-search-result__article--document")
            .attr("data-md-score", doc.formatted_score())
            .child(Element::new("div").class("md-search-result__icon md-icon"))
            .child(Element::new("h1").class("md-search-result__title").text(doc.title.as_str()))
            .child_opt(teaser.then(|| self.teaser(doc)).flatten())
            .child_opt(self.tags(doc))
            .child_opt(teaser.then(|| self.missing_line(doc)).flatten());

        Self::link(doc, article)
    }

    /// A section below the article
    pub fn render_section(&self, doc: &SearchDocument) -> Element {
        let article = Element::new("article")
            .class("md-search-result__article")
            .attr("data-md-score", doc.formatted_score())
            .child(Element::new("h2").class("md-search-result__title").text(doc.title.as_str()))
            .child_opt(self.teaser(doc))
            .child_opt(self.tags(doc))
            .child_opt(self.missing_line(doc));

        Self::link(doc, article)
    }

    /// Render all documents of one result as a single list item.
    ///
    /// Sections scoring below `threshold` are collapsed behind a disclosure
    /// element. `None` falls back to the renderer's threshold; without one the
    /// threshold is infinite, which collapses every section.
    pub fn render_search_result(
        &self,
        result: &SearchResult,
        threshold: Option<f64>,
    ) -> RenderResult<Element> {
        let threshold = threshold.or(self.threshold).unwrap_or(f64::INFINITY);
        let partition = result.partition(threshold)?;

        tracing::debug!(
            article = %partition.article.location,
            best = partition.best.len(),
            more = partition.more.len(),
            "partitioned search result"
        );

        let mut item = Element::new("li")
            .class("md-search-result__item")
            .child(self.render_article_document(partition.article, partition.show_article_teaser()))
            .children(partition.best.iter().map(|doc| self.render_section(doc)));

        if !partition.more.is_empty() {
            let label = match partition.more.len() {
                1 => self.translator.translate(TranslationKey::MoreOne, Some(1)),
                n => self.translator.translate(TranslationKey::MoreOther, Some(n)),
            };
            item = item.child(
                Element::new("details")
                    .class("md-search-result__more")
                    .child(Element::new("summary").attr("tabindex", "-1").text(label))
                    .children(partition.more.iter().map(|doc| self.render_section(doc))),
            );
        }

        Ok(item)
    }

    /// Render a complete result pane: count label followed by one item per result
    pub fn render_search_results(
        &self,
        results: &[SearchResult],
        threshold: Option<f64>,
    ) -> RenderResult<Element> {
        let items = results
            .iter()
            .map(|result| self.render_search_result(result, threshold))
            .collect::<RenderResult<Vec<_>>>()?;

        Ok(Element::new("div")
            .class("md-search-result")
            .child(
                Element::new("div")
                    .class("md-search-result__meta")
                    .text(self.meta_label(results.len())),
            )
            .child(Element::new("ol").class("md-search-result__list").children(items)))
    }

    /// Label announcing how many documents matched
    pub fn meta_label(&self, count: usize) -> String {
        match count {
            0 => self.translator.translate(TranslationKey::ResultNone, None),
            1 => self.translator.translate(TranslationKey::ResultOne, Some(1)),
            n => self.translator.translate(TranslationKey::ResultOther, Some(n)),
        }
    }

    fn link(doc: &SearchDocument, article: Element) -> Element {
        Element::new("a")
            .attr("href", doc.href())
            .class("md-search-result__link")
            .attr("tabindex", "-1")
            .child(article)
    }

    fn teaser(&self, doc: &SearchDocument) -> Option<Element> {
        if doc.text.is_empty() {
            return None;
        }
        Some(
            Element::new("p")
                .class("md-search-result__teaser")
                .text(self.truncator.truncate(&doc.text, self.teaser_length)),
        )
    }

    fn missing_line(&self, doc: &SearchDocument) -> Option<Element> {
        let missing = self.missing_terms(&doc.terms);
        if missing.is_empty() {
            return None;
        }
        let label = self.translator.translate(TranslationKey::TermMissing, None);
        Some(
            Element::new("p")
                .class("md-search-result__terms")
                .text(format!("{}: ", label))
                .children(missing),
        )
    }

    fn tags(&self, doc: &SearchDocument) -> Option<Element> {
        if doc.tags.is_empty() {
            return None;
        }
        Some(
            Element::new("nav")
                .class("md-tags")
                .children(
                    doc.tags
                        .iter()
                        .map(|tag| Element::new("span").class("md-tag").text(tag.as_str())),
                ),
        )
    }
}
