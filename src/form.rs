use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::error::FormError;
use crate::icons::icon_x;
use crate::model::{Expense, ExpensePayload, CATEGORIES};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModalState {
    Closed,
    OpenForCreate,
    OpenForEdit(i64),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModalState::OpenForEdit(_) => "Edit Expense",
            _ => "Add Expense",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormField {
    Title,
    Category,
    Amount,
    Date,
    Notes,
}

/// Raw field values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub id: Option<i64>,
    pub title: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub notes: String,
}

/// Where a valid submission goes.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(ExpensePayload),
    Update(i64, ExpensePayload),
}

impl ExpenseForm {
    pub fn for_create(today: &str) -> Self {
        ExpenseForm {
            date: today.to_string(),
            ..ExpenseForm::default()
        }
    }

    pub fn for_edit(expense: &Expense) -> Self {
        ExpenseForm {
            id: Some(expense.id),
            title: expense.title.clone(),
            category: expense.category.clone(),
            amount: expense.amount.to_string(),
            date: expense.date.clone(),
            notes: expense.notes.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.title = value,
            FormField::Category => self.category = value,
            FormField::Amount => self.amount = value,
            FormField::Date => self.date = value,
            FormField::Notes => self.notes = value,
        }
    }

    pub fn submission(&self) -> Result<Submission, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.category.trim().is_empty() {
            return Err(FormError::MissingCategory);
        }
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => return Err(FormError::InvalidAmount),
        };
        if self.date.trim().is_empty() {
            return Err(FormError::MissingDate);
        }

        let payload = ExpensePayload {
            title: title.to_string(),
            category: self.category.trim().to_string(),
            amount,
            date: self.date.trim().to_string(),
            notes: self.notes.clone(),
        };
        Ok(match self.id {
            Some(id) => Submission::Update(id, payload),
            None => Submission::Create(payload),
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpenseModalProps {
    pub modal: ModalState,
    pub form: ExpenseForm,
    pub error: Option<String>,
    pub on_input: Callback<(FormField, String)>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

fn field_input(field: FormField, on_input: &Callback<(FormField, String)>) -> Callback<InputEvent> {
    let on_input = on_input.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            on_input.emit((field, input.value()));
        } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
            on_input.emit((field, area.value()));
        }
    })
}

#[function_component(ExpenseModal)]
pub fn expense_modal(props: &ExpenseModalProps) -> Html {
    if !props.modal.is_open() {
        return html! {};
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        // clicks inside the dialog bubble up with a different target
        Callback::from(move |e: MouseEvent| {
            if e.target().is_some() && e.target() == e.current_target() {
                on_close.emit(());
            }
        })
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_category = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_input.emit((FormField::Category, select.value()));
        })
    };

    let form = &props.form;
    html! {
        <div id="expenseModal" onclick={on_backdrop} class="modal active fixed inset-0 bg-black/40 flex items-center justify-center z-50">
            <div class="bg-card rounded-[10px] p-6 w-full max-w-lg border border-border shadow-lg">
                <div class="flex items-center justify-between mb-4">
                    <h3 id="modalTitle" class="font-bold text-foreground text-lg">{ props.modal.title() }</h3>
                    <button id="closeModal" type="button" onclick={on_close.clone()} class="p-1 rounded hover:bg-secondary">{ icon_x() }</button>
                </div>
                <form id="expenseForm" onsubmit={on_submit} class="space-y-3">
                    <input id="expenseId" type="hidden" value={form.id.map(|id| id.to_string()).unwrap_or_default()} />
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Title"}</label>
                        <input id="expenseTitle" type="text" required={true} value={form.title.clone()} oninput={field_input(FormField::Title, &props.on_input)} class="w-full p-2 border rounded" />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                            <select id="expenseCategory" required={true} onchange={on_category} class="w-full p-2 border rounded">
                                <option value="" selected={form.category.is_empty()}>{"Select category"}</option>
                                { for CATEGORIES.iter().map(|c| html! {
                                    <option value={*c} selected={form.category == *c}>{ *c }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Amount"}</label>
                            <input id="expenseAmount" type="number" step="0.01" min="0" required={true} value={form.amount.clone()} oninput={field_input(FormField::Amount, &props.on_input)} class="w-full p-2 border rounded" />
                        </div>
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Date"}</label>
                        <input id="expenseDate" type="date" required={true} value={form.date.clone()} oninput={field_input(FormField::Date, &props.on_input)} class="w-full p-2 border rounded" />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Notes"}</label>
                        <textarea id="expenseNotes" value={form.notes.clone()} oninput={field_input(FormField::Notes, &props.on_input)} class="w-full p-2 border rounded"></textarea>
                    </div>
                    {
                        if let Some(msg) = &props.error {
                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                        } else { html!{} }
                    }
                    <div class="flex gap-3 justify-end">
                        <button id="cancelBtn" type="button" onclick={on_close} class="bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-sm font-bold">{"Cancel"}</button>
                        <button type="submit" class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-sm font-bold">{"Save"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::sample;

    #[test]
    fn edit_round_trips_record_fields() {
        for expense in sample() {
            let payload = match ExpenseForm::for_edit(&expense).submission() {
                Ok(Submission::Update(id, payload)) => {
                    assert_eq!(id, expense.id);
                    payload
                }
                other => panic!("unexpected {other:?}"),
            };
            assert_eq!(payload.title, expense.title);
            assert_eq!(payload.category, expense.category);
            assert_eq!(payload.amount, expense.amount);
            assert_eq!(payload.date, expense.date);
            assert_eq!(payload.notes, expense.notes.clone().unwrap_or_default());
        }
    }

    #[test]
    fn create_form_defaults_date_and_clears_id() {
        let form = ExpenseForm::for_create("2024-03-01");
        assert_eq!(form.id, None);
        assert_eq!(form.date, "2024-03-01");
        assert!(form.title.is_empty() && form.amount.is_empty());
    }

    #[test]
    fn tracked_id_selects_update() {
        let form = ExpenseForm::for_edit(&sample()[1]);
        match form.submission() {
            Ok(Submission::Update(id, payload)) => {
                assert_eq!(id, 2);
                assert_eq!(payload.notes, "monthly pass");
                assert_eq!(payload.amount, 2.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_id_selects_create() {
        let mut form = ExpenseForm::for_create("2024-03-01");
        form.set(FormField::Title, "Lunch".to_string());
        form.set(FormField::Category, "Food".to_string());
        form.set(FormField::Amount, "12.5".to_string());
        assert!(matches!(form.submission(), Ok(Submission::Create(p)) if p.amount == 12.5));
    }

    #[test]
    fn invalid_amount_is_rejected_locally() {
        let mut form = ExpenseForm::for_edit(&sample()[0]);
        form.set(FormField::Amount, "abc".to_string());
        assert_eq!(form.submission(), Err(FormError::InvalidAmount));
        form.set(FormField::Amount, "-1".to_string());
        assert_eq!(form.submission(), Err(FormError::InvalidAmount));
    }

    #[test]
    fn missing_title_is_rejected_locally() {
        let mut form = ExpenseForm::for_edit(&sample()[0]);
        form.set(FormField::Title, "   ".to_string());
        assert_eq!(form.submission(), Err(FormError::MissingTitle));
    }

    #[test]
    fn modal_titles() {
        assert_eq!(ModalState::OpenForCreate.title(), "Add Expense");
        assert_eq!(ModalState::OpenForEdit(3).title(), "Edit Expense");
        assert!(!ModalState::Closed.is_open());
    }
}
