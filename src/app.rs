use std::sync::Arc;

use chrono::{DateTime, Local};
use dioxus::prelude::*;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::entities::command::RowCommand;
use crate::domain::entities::dataset::{FilterCriteria, StatusFilter};
use crate::domain::entities::row::{Row, Status};
use crate::domain::error::StoreError;
use crate::domain::views::stats::Stats;
use crate::infra::import::FileParser;
use crate::infra::sqlite::kv_store::SqliteStorage;
use crate::platform::desktop::blocking::run_blocking;
use crate::platform::desktop::dialogs::{confirm_clear, pick_export_target, pick_spreadsheet};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::storage::RecordStorage;
use crate::usecase::services::dataset_store::DatasetStore;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::QueryService;

const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;";

fn status_color(status: Status) -> &'static str {
    match status {
        Status::Pending => "#fef3c7",
        Status::Paid => "#d1fae5",
        Status::Late => "#fee2e2",
    }
}

fn cell_text(row: &Row, column: &str) -> String {
    let text = row.display_value(column);
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}

fn saved_at_label(stamp: &str) -> String {
    DateTime::parse_from_rfc3339(stamp)
        .map(|saved| saved.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| stamp.to_string())
}

fn apply_row_command(
    mut store: Signal<DatasetStore>,
    mut stats: Signal<Stats>,
    mut status: Signal<String>,
    id: &str,
    command: RowCommand,
) {
    let result = store.write().dispatch(id, command);
    match result {
        Ok(outcome) if !outcome.applied => {
            *status.write() = format!("Linha não encontrada: {id}");
        }
        Ok(outcome) => {
            if outcome.refresh_stats {
                stats.set(QueryService::stats(&store.read()));
            }
        }
        Err(err) => {
            // The edit already sits in memory when only the write failed.
            if matches!(err, StoreError::PersistFailure(_)) {
                stats.set(QueryService::stats(&store.read()));
            }
            *status.write() = err.to_string();
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: usize, color: &'static str) -> Element {
    rsx! {
        div {
            style: "flex: 1; padding: 12px 16px; border-radius: 8px; background: {color}; border: 1px solid #e5e7eb;",
            div { style: "font-size: 12px; color: #555;", "{label}" }
            div { style: "font-size: 24px; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
fn RowView(
    row: Row,
    columns: Vec<String>,
    store: Signal<DatasetStore>,
    stats: Signal<Stats>,
    status: Signal<String>,
) -> Element {
    let status_id = row.id.clone();
    let note_id = row.id.clone();
    let background = status_color(row.status);

    rsx! {
        tr {
            for column in columns.iter() {
                td { style: "padding: 6px 10px; border-bottom: 1px solid #eee;", {cell_text(&row, column)} }
            }
            td { style: "padding: 6px 10px; border-bottom: 1px solid #eee;",
                select {
                    style: "padding: 4px 8px; border-radius: 6px; border: 1px solid #bbb; background: {background};",
                    value: row.status.as_str(),
                    onchange: move |event| {
                        let Ok(next) = event.value().parse::<Status>() else {
                            return;
                        };
                        apply_row_command(store, stats, status, &status_id, RowCommand::SetStatus(next));
                    },
                    for choice in Status::ALL {
                        option {
                            value: choice.as_str(),
                            selected: choice == row.status,
                            {choice.label()}
                        }
                    }
                }
            }
            td { style: "padding: 6px 10px; border-bottom: 1px solid #eee;",
                input {
                    r#type: "text",
                    style: "width: 100%; min-width: 220px; padding: 4px 8px; border: 1px solid #ddd; border-radius: 6px;",
                    value: row.note.clone(),
                    placeholder: "Adicionar nota...",
                    onchange: move |event| {
                        apply_row_command(store, stats, status, &note_id, RowCommand::SetNote(event.value()));
                    },
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            return rsx! {
                div {
                    p { "Não foi possível obter o diretório de dados: {err}" }
                }
            };
        }
    };

    let db_path = config.db_path();
    let storage = use_hook(move || -> Arc<dyn RecordStorage> {
        let storage = SqliteStorage::new(db_path);
        if let Err(err) = storage.init() {
            warn!(error = %err, "failed to initialize storage");
        }
        Arc::new(storage)
    });
    let import_service = use_hook(|| Arc::new(ImportService::new(Arc::new(FileParser))));

    let AppState {
        mut store,
        mut stats,
        mut search,
        mut status_filter,
        mut busy,
        mut status,
    } = AppState::new(storage);

    let table = use_memo(move || {
        let criteria = FilterCriteria::new(status_filter(), search());
        QueryService::table_view(&store.read(), &criteria)
    });

    let handle_import = move |_: MouseEvent| {
        let Some(path) = pick_spreadsheet() else {
            return;
        };
        busy.set(true);
        status.set(format!("Processando {}", path.display()));

        let import_service = import_service.clone();
        spawn(async move {
            let source = path.clone();
            let parsed = run_blocking(move || import_service.read_file(&source))
                .await
                .unwrap_or_else(|err| Err(StoreError::ParseFailure(format!("{err:#}"))));
            let result = parsed.and_then(|data| store.write().import(data.rows, data.columns));

            match result {
                Ok(count) => {
                    stats.set(QueryService::stats(&store.read()));
                    status.set(format!("{count} linhas importadas de {}", path.display()));
                }
                Err(err) if err.is_import_rejection() => {
                    status.set(err.to_string());
                }
                Err(err) => {
                    stats.set(QueryService::stats(&store.read()));
                    status.set(err.to_string());
                }
            }
            busy.set(false);
        });
    };

    let handle_export = move |_: MouseEvent| {
        let Some(path) = pick_export_target(&ExportService::suggested_filename()) else {
            return;
        };
        match ExportService::export_to(&store.read(), &path) {
            Ok(count) => *status.write() = format!("{count} linhas exportadas para {}", path.display()),
            Err(err) => *status.write() = format!("Erro ao exportar: {err:#}"),
        }
    };

    let handle_clear = move |_: MouseEvent| {
        if !confirm_clear() {
            return;
        }
        let result = store.write().clear();
        search.set(String::new());
        status_filter.set(StatusFilter::All);
        stats.set(Stats::default());
        *status.write() = match result {
            Ok(()) => "Dados removidos".to_string(),
            Err(err) => err.to_string(),
        };
    };

    let view = table();
    let totals = stats();
    let current_search = search();
    let current_filter = status_filter();
    let status_line = status();
    let last_saved = store.read().last_update().map(saved_at_label);

    rsx! {
        div { style: "font-family: sans-serif; padding: 16px; display: flex; flex-direction: column; gap: 12px;",
            div { style: "display: flex; align-items: center; gap: 8px;",
                h2 { style: "margin: 0; flex: 1;", "Controle de Faturas" }
                button {
                    style: BUTTON_STYLE,
                    disabled: busy(),
                    onclick: handle_import,
                    if busy() { "Processando..." } else { "Importar Planilha" }
                }
                if view.has_data() {
                    button { style: BUTTON_STYLE, disabled: busy(), onclick: handle_export, "Exportar CSV" }
                    button { style: BUTTON_STYLE, disabled: busy(), onclick: handle_clear, "Limpar Dados" }
                }
            }

            p { style: "margin: 0; color: #555; font-size: 13px;", "{status_line}" }
            if let Some(saved) = last_saved {
                p { style: "margin: 0; color: #888; font-size: 12px;", "Salvo em {saved}" }
            }

            if !view.has_data() {
                div { style: "padding: 48px; text-align: center; color: #777; border: 2px dashed #ddd; border-radius: 12px;",
                    p { "Nenhuma planilha carregada" }
                    p { "Importe um arquivo CSV ou Excel (.xlsx, .xls) para começar" }
                }
            } else {
                div { style: "display: flex; gap: 12px;",
                    StatCard { label: "Total", value: totals.total, color: "#f3f4f6" }
                    StatCard { label: "Pagos", value: totals.paid, color: status_color(Status::Paid) }
                    StatCard { label: "Pendentes", value: totals.pending, color: status_color(Status::Pending) }
                    StatCard { label: "Atrasados", value: totals.late, color: status_color(Status::Late) }
                }

                div { style: "display: flex; gap: 8px; align-items: center;",
                    input {
                        r#type: "text",
                        style: "flex: 1; padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                        placeholder: "Buscar em todas as colunas...",
                        value: "{current_search}",
                        oninput: move |event| search.set(event.value()),
                    }
                    select {
                        style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                        value: current_filter.as_str(),
                        onchange: move |event| {
                            if let Ok(next) = event.value().parse::<StatusFilter>() {
                                status_filter.set(next);
                            }
                        },
                        for choice in StatusFilter::OPTIONS {
                            option {
                                value: choice.as_str(),
                                selected: choice == current_filter,
                                {choice.label()}
                            }
                        }
                    }
                }

                div { style: "overflow: auto; border: 1px solid #e5e7eb; border-radius: 8px;",
                    table { style: "border-collapse: collapse; width: 100%; font-size: 13px;",
                        thead {
                            tr { style: "background: #f9fafb; text-align: left;",
                                for column in view.columns.iter() {
                                    th { style: "padding: 8px 10px;", "{column}" }
                                }
                                th { style: "padding: 8px 10px; min-width: 160px;", "Status" }
                                th { style: "padding: 8px 10px; min-width: 250px;", "Observação" }
                            }
                        }
                        if view.has_results() {
                            tbody {
                                for row in view.rows.iter() {
                                    RowView {
                                        key: "{row.id}",
                                        row: row.clone(),
                                        columns: view.columns.clone(),
                                        store,
                                        stats,
                                        status,
                                    }
                                }
                            }
                        }
                    }
                    if !view.has_results() {
                        p { style: "padding: 24px; text-align: center; color: #777;", "Nenhum resultado encontrado" }
                    }
                }
            }
        }
    }
}
