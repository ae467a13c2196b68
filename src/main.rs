use iced::widget::{
    button, column, horizontal_rule, progress_bar, row, scrollable, text, text_input, Column,
};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

mod pages;
mod progress;
mod state;
mod ui;
mod update;
mod zipper;

use progress::{Progress, ProgressLog};
use state::collection::PageCollection;
use state::page::Page;
use ui::strip::{self, HandleMap};
use zipper::sequencer;

/// Which tab of the window is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Input,
    Output,
    Utilities,
    Help,
}

/// The two capture sides of a book spread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn title(self) -> &'static str {
        match self {
            Side::Left => "Left Pages",
            Side::Right => "Right Pages",
        }
    }
}

/// Result of a background directory scan
#[derive(Debug, Clone)]
struct ScanOutcome {
    pages: Vec<Page>,
    log: ProgressLog,
}

/// One side's capture directory and its scanned pages
struct Panel {
    /// Path entry text
    path: String,
    /// The scanned collection; replaced wholesale on every rescan
    pages: PageCollection,
    /// Texture handles for the strip, keyed by source path
    handles: HandleMap,
    /// Validation line under the path entry
    info: String,
    scanning: bool,
}

impl Panel {
    fn new() -> Self {
        Panel {
            path: String::new(),
            pages: PageCollection::new(),
            handles: HandleMap::new(),
            info: "Select a path".to_string(),
            scanning: false,
        }
    }
}

/// Main application state
struct PageZipper {
    screen: Screen,
    left: Panel,
    right: Panel,
    /// Output directory path entry
    output_path: String,
    /// Filename prefix for saved pages
    prefix: String,
    /// Merged, flattened preview of what a save would write
    merged: Vec<Page>,
    /// Collection revisions the preview was built from
    merged_revisions: (u64, u64),
    /// Progress of the most recent long operation, for the log pane
    activity: Option<ProgressLog>,
    saving: bool,
    /// Rename utility fields
    rename_path: String,
    rename_prefix: String,
    start_number: String,
    renaming: bool,
    status: String,
    update_notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ScreenSelected(Screen),
    /// Input side path handling
    Browse(Side),
    PathChosen(Side, Option<PathBuf>),
    PathEdited(Side, String),
    PathSubmitted(Side),
    ScanComplete(Side, ScanOutcome),
    /// Strip interactions
    ToggleSelect(Side, usize),
    Group(Side),
    Ungroup(Side),
    /// Output screen
    BrowseOutput,
    OutputChosen(Option<PathBuf>),
    OutputEdited(String),
    PrefixEdited(String),
    Save,
    SaveConfirmed(bool),
    SaveComplete(Result<ProgressLog, String>),
    /// Rename utility
    BrowseRenameFolder,
    RenameFolderChosen(Option<PathBuf>),
    RenamePathEdited(String),
    RenamePrefixEdited(String),
    StartNumberEdited(String),
    RenameFiles,
    RenameComplete(Result<ProgressLog, String>),
    /// Update check
    CheckForUpdates,
    UpdateChecked(Result<Option<String>, String>),
    None,
}

impl PageZipper {
    fn new() -> (Self, Task<Message>) {
        let app = PageZipper {
            screen: Screen::Input,
            left: Panel::new(),
            right: Panel::new(),
            output_path: String::new(),
            prefix: "img_".to_string(),
            merged: Vec::new(),
            merged_revisions: (0, 0),
            activity: None,
            saving: false,
            rename_path: String::new(),
            rename_prefix: "img_".to_string(),
            start_number: "1".to_string(),
            renaming: false,
            status: "Ready".to_string(),
            update_notice: None,
        };

        // A failed startup check is ignored by the handler
        (
            app,
            Task::perform(check_updates_async(), Message::UpdateChecked),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScreenSelected(screen) => {
                self.screen = screen;
                Task::none()
            }

            Message::Browse(side) => {
                let start = existing_dir(&self.panel(side).path);
                Task::perform(pick_folder(start), move |path| {
                    Message::PathChosen(side, path)
                })
            }
            Message::PathChosen(side, Some(path)) => {
                self.panel_mut(side).path = path.to_string_lossy().into_owned();
                self.start_scan(side)
            }
            Message::PathChosen(_, None) => Task::none(),
            Message::PathEdited(side, value) => {
                let panel = self.panel_mut(side);
                panel.path = value;
                panel.info = if panel.path.is_empty() {
                    "Select a path".to_string()
                } else if Path::new(&panel.path).is_dir() {
                    "Press Enter to scan".to_string()
                } else {
                    "Invalid path".to_string()
                };
                Task::none()
            }
            Message::PathSubmitted(side) => self.start_scan(side),
            Message::ScanComplete(side, outcome) => {
                let panel = self.panel_mut(side);
                panel.scanning = false;
                panel.handles = build_handles(&outcome.pages);
                panel.info = if outcome.pages.is_empty() {
                    "No images found".to_string()
                } else {
                    format!("Found {} images", outcome.pages.len())
                };
                panel.pages.load(outcome.pages);
                self.activity = Some(outcome.log);
                self.refresh_merged();
                Task::none()
            }

            Message::ToggleSelect(side, index) => {
                self.panel_mut(side).pages.toggle(index);
                Task::none()
            }
            Message::Group(side) => match self.panel_mut(side).pages.group() {
                Ok(()) => {
                    self.refresh_merged();
                    Task::none()
                }
                Err(err) => error_dialog("Error", err.to_string()),
            },
            Message::Ungroup(side) => match self.panel_mut(side).pages.ungroup() {
                Ok(()) => {
                    self.refresh_merged();
                    Task::none()
                }
                Err(err) => error_dialog("Error", err.to_string()),
            },

            Message::BrowseOutput => {
                let start = existing_dir(&self.output_path);
                Task::perform(pick_folder(start), Message::OutputChosen)
            }
            Message::OutputChosen(Some(path)) => {
                self.output_path = path.to_string_lossy().into_owned();
                Task::none()
            }
            Message::OutputChosen(None) => Task::none(),
            Message::OutputEdited(value) => {
                self.output_path = value;
                Task::none()
            }
            Message::PrefixEdited(value) => {
                self.prefix = value;
                Task::none()
            }

            Message::Save => {
                let inputs_ready = !self.left.pages.is_empty() && !self.right.pages.is_empty();
                if !inputs_ready || !Path::new(&self.output_path).is_dir() {
                    return error_dialog("Error", "No input/output directories selected".into());
                }

                let description =
                    format!("Saving may overwrite some files in {}", self.output_path);
                Task::perform(
                    confirm_dialog("Proceed?".to_string(), description),
                    Message::SaveConfirmed,
                )
            }
            Message::SaveConfirmed(false) => Task::none(),
            Message::SaveConfirmed(true) => {
                self.saving = true;
                self.status = format!("Saving images to {}...", self.output_path);

                let pages = self.merged.clone();
                let out = PathBuf::from(&self.output_path);
                let prefix = self.prefix.clone();
                Task::perform(save_files_async(pages, out, prefix), Message::SaveComplete)
            }
            Message::SaveComplete(result) => {
                self.saving = false;
                match result {
                    Ok(log) => {
                        self.status = format!("Saved {} images", log.completed());
                        self.activity = Some(log);
                        Task::none()
                    }
                    Err(err) => {
                        self.status = "Save failed".to_string();
                        error_dialog("Error", err)
                    }
                }
            }

            Message::BrowseRenameFolder => {
                let start = existing_dir(&self.rename_path);
                Task::perform(pick_folder(start), Message::RenameFolderChosen)
            }
            Message::RenameFolderChosen(Some(path)) => {
                self.rename_path = path.to_string_lossy().into_owned();
                Task::none()
            }
            Message::RenameFolderChosen(None) => Task::none(),
            Message::RenamePathEdited(value) => {
                self.rename_path = value;
                Task::none()
            }
            Message::RenamePrefixEdited(value) => {
                self.rename_prefix = value;
                Task::none()
            }
            Message::StartNumberEdited(value) => {
                self.start_number = value;
                Task::none()
            }
            Message::RenameFiles => {
                if !Path::new(&self.rename_path).is_dir() {
                    return error_dialog(
                        "Error",
                        "No directory specified, or path is invalid".into(),
                    );
                }
                let start_number = match self.start_number.trim().parse::<usize>() {
                    Ok(n) => n,
                    Err(_) => {
                        return error_dialog(
                            "Error",
                            "Starting number must be a whole number".into(),
                        );
                    }
                };

                self.renaming = true;
                self.status = format!("Renaming files in {}...", self.rename_path);

                let dir = PathBuf::from(&self.rename_path);
                let prefix = self.rename_prefix.clone();
                Task::perform(
                    rename_files_async(dir, start_number, prefix),
                    Message::RenameComplete,
                )
            }
            Message::RenameComplete(result) => {
                self.renaming = false;
                match result {
                    Ok(log) => {
                        self.status = "Rename completed".to_string();
                        self.activity = Some(log);
                        Task::none()
                    }
                    Err(err) => {
                        self.status = "Rename failed".to_string();
                        error_dialog("Error", err)
                    }
                }
            }

            Message::CheckForUpdates => {
                self.status = "Checking for updates...".to_string();
                Task::perform(check_updates_async(), Message::UpdateChecked)
            }
            Message::UpdateChecked(Ok(Some(tag))) => {
                self.update_notice = Some(format!(
                    "An updated version of Page Zipper is available ({}). Download: {}",
                    tag,
                    update::download_url()
                ));
                Task::none()
            }
            Message::UpdateChecked(Ok(None)) => {
                self.status = "Page Zipper is up to date".to_string();
                Task::none()
            }
            Message::UpdateChecked(Err(_)) => {
                // Startup checks land here when offline; the status line is enough
                self.status = "Update check failed".to_string();
                Task::none()
            }

            Message::None => Task::none(),
        }
    }

    fn view(&self) -> Element<Message> {
        let tabs = row![
            self.tab_button("Input", Screen::Input),
            self.tab_button("Output", Screen::Output),
            self.tab_button("Utilities", Screen::Utilities),
            self.tab_button("Help", Screen::Help),
        ]
        .spacing(5);

        let body = match self.screen {
            Screen::Input => self.input_screen(),
            Screen::Output => self.output_screen(),
            Screen::Utilities => self.utilities_screen(),
            Screen::Help => self.help_screen(),
        };

        let mut content = column![tabs, scrollable(body).height(Length::Fill)]
            .spacing(15)
            .padding(15);

        if let Some(notice) = &self.update_notice {
            content = content.push(text(notice).size(14));
        }
        if let Some(log) = &self.activity {
            content = content.push(activity_view(log));
        }
        content = content.push(text(&self.status).size(14));

        content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn tab_button<'a>(&self, label: &'a str, screen: Screen) -> Element<'a, Message> {
        button(label)
            .on_press(Message::ScreenSelected(screen))
            .style(if self.screen == screen {
                button::primary
            } else {
                button::secondary
            })
            .into()
    }

    fn input_screen(&self) -> Element<Message> {
        column![
            self.panel_view(Side::Left),
            horizontal_rule(2),
            self.panel_view(Side::Right),
        ]
        .spacing(15)
        .into()
    }

    fn panel_view(&self, side: Side) -> Element<Message> {
        let panel = self.panel(side);

        let info = if panel.scanning {
            "Scanning..."
        } else {
            panel.info.as_str()
        };

        column![
            text(side.title()).size(20),
            ui::browser::directory_row(
                "Path:",
                &panel.path,
                move |value| Message::PathEdited(side, value),
                Message::PathSubmitted(side),
                Message::Browse(side),
            ),
            text(info).size(14),
            strip::page_strip(
                panel.pages.entries(),
                panel.pages.selection(),
                &panel.handles,
                move |index| Message::ToggleSelect(side, index),
            ),
            row![
                button("Group").on_press(Message::Group(side)),
                button("Ungroup").on_press(Message::Ungroup(side)),
            ]
            .spacing(10),
        ]
        .spacing(10)
        .into()
    }

    fn output_screen(&self) -> Element<Message> {
        column![
            text("Output").size(20),
            ui::browser::directory_row(
                "Path:",
                &self.output_path,
                Message::OutputEdited,
                Message::None,
                Message::BrowseOutput,
            ),
            row![
                text("File Prefix:"),
                text_input("img_", &self.prefix)
                    .on_input(Message::PrefixEdited)
                    .width(Length::Fixed(200.0)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            text(format!("{} pages will be written", self.merged.len())).size(14),
            strip::merged_grid(&self.merged, &[&self.left.handles, &self.right.handles]),
            button(if self.saving { "Saving..." } else { "Save" })
                .on_press_maybe((!self.saving).then_some(Message::Save)),
        ]
        .spacing(10)
        .into()
    }

    fn utilities_screen(&self) -> Element<Message> {
        column![
            text("Rename Files").size(20),
            ui::browser::directory_row(
                "Rename files in folder:",
                &self.rename_path,
                Message::RenamePathEdited,
                Message::None,
                Message::BrowseRenameFolder,
            ),
            row![
                text("Starting Number:"),
                text_input("1", &self.start_number)
                    .on_input(Message::StartNumberEdited)
                    .width(Length::Fixed(100.0)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            row![
                text("File Prefix:"),
                text_input("img_", &self.rename_prefix)
                    .on_input(Message::RenamePrefixEdited)
                    .width(Length::Fixed(200.0)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            button(if self.renaming {
                "Renaming..."
            } else {
                "Rename Files"
            })
            .on_press_maybe((!self.renaming).then_some(Message::RenameFiles)),
        ]
        .spacing(10)
        .into()
    }

    fn help_screen(&self) -> Element<Message> {
        column![
            text(format!("Page Zipper v{}", env!("CARGO_PKG_VERSION"))).size(28),
            text(
                "Page Zipper is a tool to aid in the document capture process. \
                 It is designed to merge (zip) right and left captured pages of books."
            )
            .size(16),
            text(format!(
                "Readme and issue tracker: https://github.com/{}",
                update::REPOSITORY
            ))
            .size(14),
            button("Check for Updates").on_press(Message::CheckForUpdates),
        ]
        .spacing(15)
        .into()
    }

    fn panel(&self, side: Side) -> &Panel {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn panel_mut(&mut self, side: Side) -> &mut Panel {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Launch a background scan of the side's directory
    fn start_scan(&mut self, side: Side) -> Task<Message> {
        let dir = PathBuf::from(&self.panel(side).path);
        if !dir.is_dir() {
            self.panel_mut(side).info = "Invalid path".to_string();
            return Task::none();
        }

        self.panel_mut(side).scanning = true;
        Task::perform(scan_folder_async(dir), move |outcome| {
            Message::ScanComplete(side, outcome)
        })
    }

    /// Rebuild the merged preview when either collection has changed.
    /// The collections are the source of truth; the view just follows
    /// their revision counters.
    fn refresh_merged(&mut self) {
        let revisions = (self.left.pages.revision(), self.right.pages.revision());
        if revisions == self.merged_revisions {
            return;
        }
        self.merged_revisions = revisions;

        // The right page of a spread is captured first, so it leads
        let merged = sequencer::merge_lists(self.right.pages.entries(), self.left.pages.entries());
        self.merged = sequencer::flatten_groups(&merged);
    }
}

fn main() -> iced::Result {
    iced::application("Page Zipper", PageZipper::update, PageZipper::view)
        .theme(PageZipper::theme)
        .centered()
        .run_with(PageZipper::new)
}

/// Progress bar and scrolling log for the most recent operation
fn activity_view(log: &ProgressLog) -> Element<Message> {
    let total = log.total_steps().max(1) as f32;

    let lines = Column::with_children(
        log.lines()
            .iter()
            .map(|line| text(line).size(12).into())
            .collect::<Vec<Element<Message>>>(),
    );

    column![
        progress_bar(0.0..=total, log.completed() as f32).height(Length::Fixed(12.0)),
        scrollable(lines).height(Length::Fixed(120.0)),
    ]
    .spacing(5)
    .into()
}

/// Wrap every scanned thumbnail in a texture handle for the strip
fn build_handles(pages: &[Page]) -> HandleMap {
    pages
        .iter()
        .filter_map(|page| {
            page.thumb.as_ref().map(|thumb| {
                (
                    page.path.clone(),
                    iced::widget::image::Handle::from_rgba(
                        thumb.width,
                        thumb.height,
                        thumb.pixels.clone(),
                    ),
                )
            })
        })
        .collect()
}

fn existing_dir(path: &str) -> Option<PathBuf> {
    let path = PathBuf::from(path);
    path.is_dir().then_some(path)
}

/// Show the native folder picker dialog
async fn pick_folder(start: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new().set_title("Choose Folder");
    if let Some(start) = start {
        dialog = dialog.set_directory(start);
    }

    dialog
        .pick_folder()
        .await
        .map(|folder| folder.path().to_path_buf())
}

/// User-acknowledged error dialog; resolves to a no-op message
fn error_dialog(title: &str, description: String) -> Task<Message> {
    let title = title.to_string();
    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title(&title)
                .set_description(&description)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::None,
    )
}

async fn confirm_dialog(title: String, description: String) -> bool {
    let result = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(&title)
        .set_description(&description)
        .set_buttons(MessageButtons::OkCancel)
        .show()
        .await;

    result == MessageDialogResult::Ok
}

/// Scan a capture directory on the blocking pool; image decoding must not
/// stall a runtime worker
async fn scan_folder_async(dir: PathBuf) -> ScanOutcome {
    let scanned = tokio::task::spawn_blocking(move || {
        let total = std::fs::read_dir(&dir).map(|it| it.count()).unwrap_or(0);
        let mut log = ProgressLog::new(total);

        let found = pages::scanner::scan_pages(&dir, &mut log);
        log.log(&format!("Found {} images in {}", found.len(), dir.display()));

        ScanOutcome { pages: found, log }
    })
    .await;

    scanned.unwrap_or_else(|_| {
        let mut log = ProgressLog::new(0);
        log.log("Scan was interrupted");
        ScanOutcome {
            pages: Vec::new(),
            log,
        }
    })
}

/// Clear the output directory, then copy the merged sequence into it
async fn save_files_async(
    pages: Vec<Page>,
    out: PathBuf,
    prefix: String,
) -> Result<ProgressLog, String> {
    tokio::task::spawn_blocking(move || {
        let mut log = ProgressLog::new(pages.len());

        zipper::save::clear_dir(&out).map_err(|err| err.to_string())?;
        zipper::save::copy_files(&pages, &out, &prefix, 1, &mut log)
            .map_err(|err| err.to_string())?;

        log.log("Save completed");
        Ok(log)
    })
    .await
    .map_err(|err| err.to_string())?
}

async fn rename_files_async(
    dir: PathBuf,
    start_number: usize,
    prefix: String,
) -> Result<ProgressLog, String> {
    tokio::task::spawn_blocking(move || {
        let total = std::fs::read_dir(&dir).map(|it| it.count()).unwrap_or(0);
        let mut log = ProgressLog::new(total);

        zipper::rename::rename_files(&dir, start_number, &prefix, &mut log)
            .map_err(|err| err.to_string())?;

        Ok(log)
    })
    .await
    .map_err(|err| err.to_string())?
}

async fn check_updates_async() -> Result<Option<String>, String> {
    update::check_for_updates(env!("CARGO_PKG_VERSION"))
        .await
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    #[test]
    fn test_scan_folder_async_reports_skips() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("not_an_image.jpg"), "plain text").unwrap();

        let outcome = runtime().block_on(scan_folder_async(dir.path().to_path_buf()));

        assert!(outcome.pages.is_empty());
        assert!(outcome
            .log
            .lines()
            .iter()
            .any(|line| line.contains("Error loading image")));
        assert!(outcome.log.lines().iter().any(|line| line.contains("Found 0 images")));
    }

    #[test]
    fn test_save_files_async_writes_output() {
        let source = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let path = source.path().join("scan.jpg");
        fs::write(&path, "scan").unwrap();
        let pages = vec![Page::new(path, None)];

        let log = runtime()
            .block_on(save_files_async(
                pages,
                out.path().to_path_buf(),
                "img_".to_string(),
            ))
            .unwrap();

        assert_eq!(log.completed(), 1);
        assert!(out.path().join("img_1.jpg").is_file());
    }
}
