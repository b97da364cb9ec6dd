use api::{types::PerfumeParameter, VideoRecord};
use dioxus::prelude::*;
use tracing::{error, info, warn};

use crate::dashboard::{compare_missing_last, or_dash, use_services};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterColumn {
    Brand,
    Name,
    Fragrance,
    Longevity,
    Design,
    Quality,
    Price,
}

impl ParameterColumn {
    pub const ALL: [ParameterColumn; 7] = [
        Self::Brand,
        Self::Name,
        Self::Fragrance,
        Self::Longevity,
        Self::Design,
        Self::Quality,
        Self::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Name => "Name",
            Self::Fragrance => "Fragrance",
            Self::Longevity => "Longevity",
            Self::Design => "Design",
            Self::Quality => "Quality",
            Self::Price => "Price",
        }
    }

    fn score(&self, row: &PerfumeParameter) -> Option<i64> {
        match self {
            Self::Brand | Self::Name => None,
            Self::Fragrance => row.fragrance,
            Self::Longevity => row.longevity,
            Self::Design => row.design,
            Self::Quality => row.quality,
            Self::Price => row.price,
        }
    }

    fn text<'a>(&self, row: &'a PerfumeParameter) -> Option<&'a str> {
        match self {
            Self::Brand => row.brand.as_deref(),
            Self::Name => row.perfume_name.as_deref(),
            _ => None,
        }
    }

    fn cell(&self, row: &PerfumeParameter) -> String {
        match self {
            Self::Brand | Self::Name => or_dash(self.text(row).unwrap_or_default()).to_string(),
            _ => self
                .score(row)
                .map_or_else(|| "—".to_string(), |score| score.to_string()),
        }
    }
}

/// Clicking a header sorts ascending; clicking it again flips the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterSort {
    pub column: Option<ParameterColumn>,
    pub descending: bool,
}

impl ParameterSort {
    pub fn toggle(self, column: ParameterColumn) -> Self {
        if self.column == Some(column) {
            Self {
                column: Some(column),
                descending: !self.descending,
            }
        } else {
            Self {
                column: Some(column),
                descending: false,
            }
        }
    }

    /// Stable sort. Missing values go last in either direction.
    pub fn apply(&self, rows: &mut [PerfumeParameter]) {
        let Some(column) = self.column else {
            return;
        };
        let descending = self.descending;
        rows.sort_by(|a, b| match column {
            ParameterColumn::Brand | ParameterColumn::Name => {
                compare_missing_last(column.text(a), column.text(b), descending, |x, y| {
                    x.to_lowercase().cmp(&y.to_lowercase())
                })
            }
            _ => compare_missing_last(column.score(a), column.score(b), descending, |x, y| {
                x.cmp(&y)
            }),
        });
    }

    fn indicator(&self, column: ParameterColumn) -> &'static str {
        match (self.column == Some(column), self.descending) {
            (false, _) => "",
            (true, false) => " ▲",
            (true, true) => " ▼",
        }
    }
}

/// Per-perfume scores for one video, fetched on demand.
#[component]
pub fn ParametersSection(#[props(!optional)] video: Option<VideoRecord>) -> Element {
    let services = use_services();
    let mut loading = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);
    let mut rows = use_signal(Vec::<PerfumeParameter>::new);
    let mut sort = use_signal(ParameterSort::default);

    let Some(video) = video else {
        return rsx! {};
    };

    let on_load = move |_: MouseEvent| {
        if loading() {
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                error_message.set(Some(message));
                return;
            }
        };
        let video = video.clone();
        loading.set(true);
        error_message.set(None);
        spawn(async move {
            match client.parameters(&video).await {
                Ok(response) if response.success && !response.perfumes.is_empty() => {
                    info!(perfumes = response.perfumes.len(), "perfume parameters loaded");
                    rows.set(response.perfumes);
                }
                Ok(response) => {
                    warn!(message = ?response.message, "no perfume parameters in response");
                    rows.set(Vec::new());
                    error_message.set(Some(
                        response
                            .message
                            .unwrap_or_else(|| "No perfumes found in the response.".to_string()),
                    ));
                }
                Err(err) => {
                    error!(%err, "perfume parameters failed");
                    error_message.set(Some(format!("Couldn't load perfume parameters: {err}")));
                }
            }
            loading.set(false);
        });
    };

    let current_sort = sort();
    let mut sorted = rows();
    current_sort.apply(&mut sorted);

    rsx! {
        section { class: "dashboard-card parameters-section",
            div { class: "dashboard-card__header",
                h2 { "Perfume parameters" }
                button {
                    class: "button button--secondary",
                    disabled: loading(),
                    onclick: on_load,
                    if loading() { "Loading…" } else { "Load parameters" }
                }
            }

            if let Some(message) = error_message() {
                p { class: "dashboard-card__error", "{message}" }
            }

            if !sorted.is_empty() {
                div { class: "table-scroll",
                    table { class: "parameters-table",
                        thead {
                            tr {
                                for column in ParameterColumn::ALL {
                                    th {
                                        class: "sortable",
                                        onclick: move |_| sort.set(current_sort.toggle(column)),
                                        "{column.label()}{current_sort.indicator(column)}"
                                    }
                                }
                            }
                        }
                        tbody {
                            for row in sorted.iter() {
                                tr {
                                    for column in ParameterColumn::ALL {
                                        td { "{column.cell(row)}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, fragrance: Option<i64>) -> PerfumeParameter {
        PerfumeParameter {
            perfume_name: Some(name.into()),
            fragrance,
            ..PerfumeParameter::default()
        }
    }

    fn names(rows: &[PerfumeParameter]) -> Vec<&str> {
        rows.iter()
            .map(|r| r.perfume_name.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn toggle_flips_direction_on_same_column() {
        let sort = ParameterSort::default().toggle(ParameterColumn::Price);
        assert_eq!(sort.column, Some(ParameterColumn::Price));
        assert!(!sort.descending);
        assert!(sort.toggle(ParameterColumn::Price).descending);
        assert!(!sort.toggle(ParameterColumn::Price).toggle(ParameterColumn::Name).descending);
    }

    #[test]
    fn missing_scores_sort_last_both_ways() {
        let mut rows = vec![row("a", Some(7)), row("b", None), row("c", Some(9))];

        ParameterSort::default()
            .toggle(ParameterColumn::Fragrance)
            .apply(&mut rows);
        assert_eq!(names(&rows), vec!["a", "c", "b"]);

        ParameterSort::default()
            .toggle(ParameterColumn::Fragrance)
            .toggle(ParameterColumn::Fragrance)
            .apply(&mut rows);
        assert_eq!(names(&rows), vec!["c", "a", "b"]);
    }

    #[test]
    fn names_sort_ignoring_case() {
        let mut rows = vec![row("sauvage", None), row("Aventus", None), row("Baccarat", None)];
        ParameterSort::default()
            .toggle(ParameterColumn::Name)
            .apply(&mut rows);
        assert_eq!(names(&rows), vec!["Aventus", "Baccarat", "sauvage"]);
    }

    #[test]
    fn cells_show_dash_for_missing_values() {
        let row = row("Aventus", None);
        assert_eq!(ParameterColumn::Fragrance.cell(&row), "—");
        assert_eq!(ParameterColumn::Brand.cell(&row), "—");
        assert_eq!(ParameterColumn::Name.cell(&row), "Aventus");
    }
}
