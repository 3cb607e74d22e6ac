use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::{export_pdf, ExpenseApi, HttpApi};
use crate::cache::ExpenseCache;
use crate::chart::{CategoryChart, MonthlyChart};
use crate::config::{AppSettings, API_BASE_URL};
use crate::form::{ExpenseForm, ExpenseModal, FormField, ModalState, Submission};
use crate::format::today_iso;
use crate::icons::{icon_download, icon_plus, icon_search};
use crate::model::{DashboardStats, Expense, CATEGORIES};
use crate::notify::{BrowserNotifier, Notifier};
use crate::stats::{stat_lines, StatCard};
use crate::table::ExpenseTable;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this expense?";

/// Everything the dashboard renders from, owned by one reducer.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub cache: ExpenseCache,
    pub search: String,
    pub category: String,
    pub modal: ModalState,
    pub form: ExpenseForm,
    pub form_error: Option<String>,
    pub stats: DashboardStats,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            cache: ExpenseCache::default(),
            search: String::new(),
            category: String::new(),
            modal: ModalState::Closed,
            form: ExpenseForm::default(),
            form_error: None,
            stats: DashboardStats::default(),
        }
    }
}

impl DashboardState {
    pub fn visible(&self) -> Vec<Expense> {
        self.cache.filter(&self.search, &self.category)
    }
}

/// Every interaction the dashboard handles.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardAction {
    ExpensesLoaded(Vec<Expense>),
    ExpensesFailed(String),
    StatsLoaded(DashboardStats),
    Search(String),
    FilterCategory(String),
    OpenCreate { today: String },
    OpenEdit(i64),
    Input(FormField, String),
    FormInvalid(String),
    Close,
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::ExpensesLoaded(expenses) => next.cache.replace(expenses),
            DashboardAction::ExpensesFailed(message) => next.cache.fail(message),
            DashboardAction::StatsLoaded(stats) => next.stats = stats,
            DashboardAction::Search(term) => next.search = term,
            DashboardAction::FilterCategory(category) => next.category = category,
            DashboardAction::OpenCreate { today } => {
                next.form = ExpenseForm::for_create(&today);
                next.form_error = None;
                next.modal = ModalState::OpenForCreate;
            }
            DashboardAction::OpenEdit(id) => {
                let Some(expense) = self.cache.find(id).cloned() else {
                    return self;
                };
                next.form = ExpenseForm::for_edit(&expense);
                next.form_error = None;
                next.modal = ModalState::OpenForEdit(id);
            }
            DashboardAction::Input(field, value) => next.form.set(field, value),
            DashboardAction::FormInvalid(message) => next.form_error = Some(message),
            DashboardAction::Close => {
                next.form = ExpenseForm::default();
                next.form_error = None;
                next.modal = ModalState::Closed;
            }
        }
        Rc::new(next)
    }
}

/// Fetch the expense list and the stats concurrently and report both.
/// A failed stats fetch keeps the cards as they were.
pub async fn reload(api: &impl ExpenseApi, dispatch: &impl Fn(DashboardAction)) {
    let (expenses, stats) = futures::join!(api.list_expenses(), api.dashboard_stats());
    match expenses {
        Ok(list) => {
            log::debug!("loaded {} expenses", list.len());
            dispatch(DashboardAction::ExpensesLoaded(list));
        }
        Err(err) => {
            log::error!("error loading expenses: {err}");
            dispatch(DashboardAction::ExpensesFailed(err.to_string()));
        }
    }
    match stats {
        Ok(stats) => dispatch(DashboardAction::StatsLoaded(stats)),
        Err(err) => log::error!("error loading stats: {err}"),
    }
}

pub async fn submit_expense(
    api: &impl ExpenseApi,
    notifier: &impl Notifier,
    form: &ExpenseForm,
    dispatch: &impl Fn(DashboardAction),
) {
    let submission = match form.submission() {
        Ok(submission) => submission,
        Err(err) => {
            dispatch(DashboardAction::FormInvalid(err.to_string()));
            return;
        }
    };

    let result = match &submission {
        Submission::Create(payload) => api.create_expense(payload).await,
        Submission::Update(id, payload) => api.update_expense(*id, payload).await,
    };
    match result {
        Ok(message) => {
            log::info!("expense saved");
            notifier.alert(&message);
            dispatch(DashboardAction::Close);
            reload(api, dispatch).await;
        }
        Err(err) => {
            log::error!("error saving expense: {err}");
            notifier.alert(&err.user_message("An error occurred", "Failed to save expense"));
        }
    }
}

/// Asks first; a declined confirmation sends nothing. A failed delete leaves
/// the cache as it was so the user can retry straight away.
pub async fn delete_expense(
    api: &impl ExpenseApi,
    notifier: &impl Notifier,
    id: i64,
    dispatch: &impl Fn(DashboardAction),
) {
    if !notifier.confirm(DELETE_PROMPT) {
        return;
    }
    match api.delete_expense(id).await {
        Ok(message) => {
            log::info!("expense {id} deleted");
            notifier.alert(&message);
            reload(api, dispatch).await;
        }
        Err(err) => {
            log::error!("error deleting expense {id}: {err}");
            notifier.alert(&err.user_message("Failed to delete expense", "Failed to delete expense"));
        }
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let state = use_reducer(DashboardState::default);

    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    {
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let api = HttpApi::new(API_BASE_URL);
                    reload(&api, &move |action| dispatcher.dispatch(action)).await;
                });
                || ()
            },
            (),
        );
    }

    let on_add = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| {
            dispatcher.dispatch(DashboardAction::OpenCreate { today: today_iso() })
        })
    };
    let on_export = Callback::from(|_| export_pdf(&HttpApi::new(API_BASE_URL)));
    let on_search = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(DashboardAction::Search(input.value()));
        })
    };
    let on_category = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(DashboardAction::FilterCategory(select.value()));
        })
    };
    let on_edit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: i64| dispatcher.dispatch(DashboardAction::OpenEdit(id)))
    };
    let on_delete = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: i64| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let api = HttpApi::new(API_BASE_URL);
                delete_expense(&api, &BrowserNotifier, id, &move |action| {
                    dispatcher.dispatch(action)
                })
                .await;
            });
        })
    };
    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, value): (FormField, String)| {
            dispatcher.dispatch(DashboardAction::Input(field, value))
        })
    };
    let on_submit = {
        let dispatcher = state.dispatcher();
        let form = state.form.clone();
        Callback::from(move |_| {
            let dispatcher = dispatcher.clone();
            let form = form.clone();
            spawn_local(async move {
                let api = HttpApi::new(API_BASE_URL);
                submit_expense(&api, &BrowserNotifier, &form, &move |action| {
                    dispatcher.dispatch(action)
                })
                .await;
            });
        })
    };
    let on_close = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(DashboardAction::Close))
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Dashboard"}</h1>
                <div class="flex gap-3">
                    <button id="exportPdfBtn" onclick={on_export} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_download() }
                        {"Export PDF"}
                    </button>
                    <button id="addExpenseBtn" onclick={on_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_plus() }
                        {"Add Expense"}
                    </button>
                </div>
            </div>

            <div class="pt-5 space-y-6">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    { for stat_lines(&state.stats, &currency_symbol).into_iter().map(|line| html! {
                        <StatCard {line} />
                    }) }
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-4">{"Spending by Category"}</h3>
                        <CategoryChart totals={state.stats.category_totals.clone()} currency_symbol={currency_symbol.clone()} />
                    </div>
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-4">{"Monthly Trend"}</h3>
                        <MonthlyChart series={state.stats.chart_data.clone()} currency_symbol={currency_symbol.clone()} />
                    </div>
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <div class="p-6 flex flex-wrap gap-3 justify-between items-center border-b border-border">
                        <h3 class="font-bold text-foreground text-lg">{"Expenses"}</h3>
                        <div class="flex gap-3 items-center">
                            <div class="flex items-center gap-2 px-3 py-2 border rounded-[10px]">
                                { icon_search() }
                                <input id="searchInput" type="text" placeholder="Search expenses" oninput={on_search} class="bg-transparent outline-none text-sm" />
                            </div>
                            <select id="categoryFilter" onchange={on_category} class="px-3 py-2 border rounded-[10px] text-sm">
                                <option value="">{"All Categories"}</option>
                                { for CATEGORIES.iter().map(|c| html! { <option value={*c}>{ *c }</option> }) }
                            </select>
                        </div>
                    </div>
                    <ExpenseTable
                        status={state.cache.status().clone()}
                        expenses={state.visible()}
                        currency_symbol={currency_symbol.clone()}
                        {on_edit}
                        {on_delete}
                    />
                </div>
            </div>

            <ExpenseModal
                modal={state.modal}
                form={state.form.clone()}
                error={state.form_error.clone()}
                {on_input}
                {on_submit}
                {on_close}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::sample;
    use crate::cache::CacheStatus;
    use crate::error::ApiError;
    use crate::model::ExpensePayload;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        write_result: Option<Result<String, ApiError>>,
        fail_list: bool,
    }

    impl FakeApi {
        fn accepting() -> Self {
            FakeApi {
                write_result: Some(Ok("Expense saved".to_string())),
                ..FakeApi::default()
            }
        }

        fn rejecting(message: Option<&str>) -> Self {
            FakeApi {
                write_result: Some(Err(ApiError::Rejected {
                    status: 400,
                    message: message.map(str::to_string),
                })),
                ..FakeApi::default()
            }
        }

        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn write(&self) -> Result<String, ApiError> {
            self.write_result.clone().unwrap_or(Ok("ok".to_string()))
        }
    }

    impl ExpenseApi for FakeApi {
        async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
            self.log("GET /api/expenses".to_string());
            if self.fail_list {
                return Err(ApiError::Network("offline".to_string()));
            }
            Ok(sample())
        }

        async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
            self.log("GET /api/dashboard/stats".to_string());
            Ok(DashboardStats {
                total_spending: 6.5,
                ..DashboardStats::default()
            })
        }

        async fn create_expense(&self, payload: &ExpensePayload) -> Result<String, ApiError> {
            self.log(format!("POST {}", payload.title));
            self.write()
        }

        async fn update_expense(
            &self,
            id: i64,
            _payload: &ExpensePayload,
        ) -> Result<String, ApiError> {
            self.log(format!("PUT {id}"));
            self.write()
        }

        async fn delete_expense(&self, id: i64) -> Result<String, ApiError> {
            self.log(format!("DELETE {id}"));
            self.write()
        }

        async fn change_currency(&self, symbol: &str) -> Result<String, ApiError> {
            self.log(format!("POST currency {symbol}"));
            self.write()
        }
    }

    struct FakeNotifier {
        answer: bool,
        alerts: RefCell<Vec<String>>,
    }

    impl FakeNotifier {
        fn answering(answer: bool) -> Self {
            FakeNotifier {
                answer,
                alerts: RefCell::new(Vec::new()),
            }
        }
    }

    impl Notifier for FakeNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, _message: &str) -> bool {
            self.answer
        }
    }

    /// Applies dispatched actions to a state the test can inspect.
    struct Harness {
        state: RefCell<Rc<DashboardState>>,
    }

    impl Harness {
        fn new(state: DashboardState) -> Self {
            Harness {
                state: RefCell::new(Rc::new(state)),
            }
        }

        fn dispatch(&self, action: DashboardAction) {
            let current = self.state.borrow().clone();
            *self.state.borrow_mut() = current.reduce(action);
        }

        fn state(&self) -> Rc<DashboardState> {
            self.state.borrow().clone()
        }
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.cache.replace(sample());
        state
    }

    fn editing(id: i64) -> Harness {
        let harness = Harness::new(loaded_state());
        harness.dispatch(DashboardAction::OpenEdit(id));
        harness
    }

    #[test]
    fn successful_update_closes_modal_and_reloads_both() {
        let api = FakeApi::accepting();
        let notifier = FakeNotifier::answering(true);
        let harness = editing(1);
        let form = harness.state().form.clone();

        block_on(submit_expense(&api, &notifier, &form, &|a| harness.dispatch(a)));

        assert_eq!(
            api.calls(),
            vec!["PUT 1", "GET /api/expenses", "GET /api/dashboard/stats"]
        );
        assert_eq!(harness.state().modal, ModalState::Closed);
        assert_eq!(harness.state().stats.total_spending, 6.5);
        assert_eq!(*notifier.alerts.borrow(), vec!["Expense saved"]);
    }

    #[test]
    fn successful_create_posts_then_reloads() {
        let api = FakeApi::accepting();
        let notifier = FakeNotifier::answering(true);
        let harness = Harness::new(loaded_state());
        harness.dispatch(DashboardAction::OpenCreate {
            today: "2024-02-01".to_string(),
        });
        harness.dispatch(DashboardAction::Input(FormField::Title, "Tea".to_string()));
        harness.dispatch(DashboardAction::Input(FormField::Category, "Food".to_string()));
        harness.dispatch(DashboardAction::Input(FormField::Amount, "3".to_string()));
        let form = harness.state().form.clone();

        block_on(submit_expense(&api, &notifier, &form, &|a| harness.dispatch(a)));

        assert_eq!(api.calls()[0], "POST Tea");
        assert_eq!(api.calls().len(), 3);
        assert!(!harness.state().modal.is_open());
    }

    #[test]
    fn rejected_submit_keeps_modal_open_without_reload() {
        let api = FakeApi::rejecting(Some("Missing required fields"));
        let notifier = FakeNotifier::answering(true);
        let harness = editing(2);
        let form = harness.state().form.clone();

        block_on(submit_expense(&api, &notifier, &form, &|a| harness.dispatch(a)));

        assert_eq!(api.calls(), vec!["PUT 2"]);
        assert_eq!(harness.state().modal, ModalState::OpenForEdit(2));
        assert_eq!(harness.state().cache.all().len(), 2);
        assert_eq!(*notifier.alerts.borrow(), vec!["Missing required fields"]);
    }

    #[test]
    fn transport_failure_on_submit_uses_fallback() {
        let api = FakeApi {
            write_result: Some(Err(ApiError::Network("offline".to_string()))),
            ..FakeApi::default()
        };
        let notifier = FakeNotifier::answering(true);
        let harness = editing(1);
        let form = harness.state().form.clone();

        block_on(submit_expense(&api, &notifier, &form, &|a| harness.dispatch(a)));

        assert!(harness.state().modal.is_open());
        assert_eq!(*notifier.alerts.borrow(), vec!["Failed to save expense"]);
    }

    #[test]
    fn invalid_form_issues_no_request() {
        let api = FakeApi::accepting();
        let notifier = FakeNotifier::answering(true);
        let harness = editing(1);
        harness.dispatch(DashboardAction::Input(FormField::Amount, "lots".to_string()));
        let form = harness.state().form.clone();

        block_on(submit_expense(&api, &notifier, &form, &|a| harness.dispatch(a)));

        assert!(api.calls().is_empty());
        assert!(harness.state().form_error.is_some());
        assert!(harness.state().modal.is_open());
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let api = FakeApi::accepting();
        let notifier = FakeNotifier::answering(false);
        let harness = Harness::new(loaded_state());

        block_on(delete_expense(&api, &notifier, 1, &|a| harness.dispatch(a)));

        assert!(api.calls().is_empty());
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[test]
    fn confirmed_delete_reloads() {
        let api = FakeApi::accepting();
        let notifier = FakeNotifier::answering(true);
        let harness = Harness::new(loaded_state());

        block_on(delete_expense(&api, &notifier, 2, &|a| harness.dispatch(a)));

        assert_eq!(
            api.calls(),
            vec!["DELETE 2", "GET /api/expenses", "GET /api/dashboard/stats"]
        );
    }

    #[test]
    fn failed_delete_leaves_cache_untouched() {
        let api = FakeApi::rejecting(None);
        let notifier = FakeNotifier::answering(true);
        let harness = Harness::new(loaded_state());
        let before = harness.state().cache.clone();

        block_on(delete_expense(&api, &notifier, 2, &|a| harness.dispatch(a)));

        assert_eq!(api.calls(), vec!["DELETE 2"]);
        assert_eq!(harness.state().cache, before);
        assert_eq!(*notifier.alerts.borrow(), vec!["Failed to delete expense"]);
    }

    #[test]
    fn failed_list_load_marks_cache_failed() {
        let api = FakeApi {
            fail_list: true,
            ..FakeApi::default()
        };
        let harness = Harness::new(DashboardState::default());

        block_on(reload(&api, &|a| harness.dispatch(a)));

        assert!(matches!(harness.state().cache.status(), CacheStatus::Failed(_)));
        assert_eq!(harness.state().stats.total_spending, 6.5);
    }

    #[test]
    fn search_and_category_filter_cached_snapshot() {
        let harness = Harness::new(loaded_state());
        harness.dispatch(DashboardAction::Search("PASS".to_string()));
        assert_eq!(harness.state().visible().len(), 1);
        harness.dispatch(DashboardAction::Search(String::new()));
        harness.dispatch(DashboardAction::FilterCategory("Food".to_string()));
        let visible = harness.state().visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
        assert_eq!(harness.state().cache.all().len(), 2);
    }

    #[test]
    fn close_resets_form_unconditionally() {
        let harness = editing(2);
        harness.dispatch(DashboardAction::Input(FormField::Title, "changed".to_string()));
        harness.dispatch(DashboardAction::Close);
        assert_eq!(harness.state().modal, ModalState::Closed);
        assert_eq!(harness.state().form, ExpenseForm::default());
    }

    #[test]
    fn editing_unknown_id_is_ignored() {
        let harness = Harness::new(loaded_state());
        harness.dispatch(DashboardAction::OpenEdit(99));
        assert_eq!(harness.state().modal, ModalState::Closed);
    }

    #[test]
    fn open_create_clears_previous_edit() {
        let harness = editing(1);
        harness.dispatch(DashboardAction::OpenCreate {
            today: "2024-05-05".to_string(),
        });
        let state = harness.state();
        assert_eq!(state.modal, ModalState::OpenForCreate);
        assert_eq!(state.form.id, None);
        assert_eq!(state.form.date, "2024-05-05");
        assert!(state.form.title.is_empty());
    }
}
