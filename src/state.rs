use std::collections::VecDeque;
use std::time::SystemTime;

use crate::board::{
    DisplayRecord, SortKey, SortState, build_board, direction_label, record_matches_query,
    sort_key_label,
};
use crate::champions::ChampionCatalog;
use crate::countdown::TimeLeft;
use crate::models::{PageMeta, PlayerResponseItem, PlayersApiResponse, QueueType, queue_label};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub queue: QueueType,
    pub sort: SortState,
    pub status: LoadStatus,
    // Raw payload and catalog are only replaced wholesale, never patched.
    pub players: Vec<PlayerResponseItem>,
    pub meta: PageMeta,
    pub catalog: ChampionCatalog,
    pub rows: Vec<DisplayRecord>,
    pub pending_request: Option<u64>,
    pub loaded_at: Option<SystemTime>,
    pub countdown: TimeLeft,
    pub selected: usize,
    pub search: String,
    pub search_active: bool,
    pub detail_open: bool,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(QueueType::Solo)
    }
}

impl AppState {
    pub fn new(queue: QueueType) -> Self {
        Self {
            queue,
            sort: SortState::default(),
            status: LoadStatus::Idle,
            players: Vec::new(),
            meta: PageMeta::default(),
            catalog: ChampionCatalog::empty(),
            rows: Vec::new(),
            pending_request: None,
            loaded_at: None,
            countdown: TimeLeft::default(),
            selected: 0,
            search: String::new(),
            search_active: false,
            detail_open: false,
            help_overlay: false,
            logs: VecDeque::with_capacity(MAX_LOGS),
            next_request_id: 1,
        }
    }

    /// Marks a new players fetch as the only one whose answer is accepted.
    pub fn begin_fetch(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(id);
        self.status = LoadStatus::Loading;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn toggle_queue(&mut self) {
        self.queue = self.queue.toggled();
        self.selected = 0;
        self.rebuild_rows();
        self.push_log(format!("[INFO] Queue: {}", queue_label(self.queue)));
    }

    pub fn select_sort(&mut self, key: SortKey) {
        let selected_id = self.selected_record().map(|r| r.id.clone());
        self.sort = self.sort.select(key);
        self.rebuild_rows();
        self.reselect(selected_id);
    }

    /// Full re-derivation of `rows` from the raw payload.
    pub fn rebuild_rows(&mut self) {
        self.rows = build_board(&self.players, self.queue, self.sort, &self.catalog);
        self.clamp_selection();
    }

    pub fn visible_rows(&self) -> Vec<&DisplayRecord> {
        self.rows
            .iter()
            .filter(|r| record_matches_query(r, &self.search))
            .collect()
    }

    pub fn selected_record(&self) -> Option<&DisplayRecord> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.visible_rows().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    fn reselect(&mut self, id: Option<String>) {
        let pos = id.and_then(|id| self.visible_rows().iter().position(|r| r.id == id));
        self.selected = pos.unwrap_or(0);
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn search_push(&mut self, ch: char) {
        self.search.push(ch);
        self.selected = 0;
    }

    pub fn search_pop(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn finish_search(&mut self) {
        self.search_active = false;
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.clamp_selection();
    }

    pub fn toggle_detail(&mut self) {
        self.detail_open = !self.detail_open;
    }

    pub fn sort_label(&self) -> String {
        format!(
            "{} {}",
            sort_key_label(self.sort.key),
            direction_label(self.sort.direction)
        )
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers {
        request_id: u64,
        response: PlayersApiResponse,
    },
    PlayersFailed {
        request_id: u64,
        error: String,
    },
    SetCatalog(ChampionCatalog),
    Countdown(TimeLeft),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchPlayers { request_id: u64 },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers {
            request_id,
            response,
        } => {
            if state.pending_request != Some(request_id) {
                state.push_log(format!("[WARN] Dropped stale players response #{request_id}"));
                return;
            }
            let selected_id = state.selected_record().map(|r| r.id.clone());
            state.pending_request = None;
            state.status = LoadStatus::Loaded;
            state.loaded_at = Some(SystemTime::now());
            state.meta = response.meta;
            state.players = response.data;
            state.rebuild_rows();
            state.reselect(selected_id);
            let count = state.players.len();
            state.push_log(format!("[INFO] Loaded {count} players"));
        }
        Delta::PlayersFailed { request_id, error } => {
            if state.pending_request != Some(request_id) {
                state.push_log(format!("[WARN] Dropped stale players error #{request_id}"));
                return;
            }
            state.pending_request = None;
            state.status = LoadStatus::Failed(error.clone());
            state.push_log(format!("[WARN] Players fetch failed: {error}"));
        }
        Delta::SetCatalog(catalog) => {
            let count = catalog.len();
            state.catalog = catalog;
            state.rebuild_rows();
            state.push_log(format!("[INFO] Champion catalog ready ({count} champions)"));
        }
        Delta::Countdown(left) => {
            state.countdown = left;
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
