//! Per-entity screens.
//!
//! Each screen binds the generic table and form machinery to one record
//! type: which columns it shows, which fields it searches, and which form
//! creates a new record. Typed conversion from form values to records lives
//! here too, next to the form it reads.

use crate::core::{
    commission::{PainterField, PainterRow},
    form::{CreateForm, FieldType, FormField, FormValues, FromForm, SelectOption},
    records::{ColorMixing, Customer, Order, OrderStatus, Painter, Stock, Stored},
    stock::{StockField, StockRow},
    table::{CellKind, Column, ColumnKey, Row, TableView, Value},
};
use crate::errors::{Result, ValidationErrors};
use chrono::NaiveDate;

/// Date format of order dates, as entered and as displayed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The action that opens a screen's create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddAction {
    pub label: &'static str,
    /// Command that fills and submits the form
    pub command: &'static str,
}

/// A list screen: a searchable table plus an optional add action.
pub struct ListScreen<R: Row> {
    pub title: &'static str,
    pub add_action: Option<AddAction>,
    pub columns: Vec<Column<R>>,
    pub search_fields: Vec<R::Field>,
}

impl<R: Row> ListScreen<R> {
    /// Renders `rows` filtered by `query`.
    pub fn view<'a>(&self, rows: impl IntoIterator<Item = &'a R>, query: &str) -> TableView
    where
        R: 'a,
    {
        TableView::build(rows, &self.columns, &self.search_fields, query)
    }
}

// --- Orders ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    OrderId,
    Date,
    CustomerName,
    PainterName,
    Amount,
    Status,
}

impl ColumnKey for OrderField {
    fn cell_kind(self) -> CellKind {
        match self {
            Self::Amount => CellKind::Money,
            Self::Status => CellKind::Status,
            Self::OrderId | Self::Date | Self::CustomerName | Self::PainterName => {
                CellKind::Plain
            }
        }
    }
}

impl Row for Stored<Order> {
    type Field = OrderField;

    fn value(&self, field: OrderField) -> Value {
        match field {
            OrderField::OrderId => (&self.order_id).into(),
            OrderField::Date => Value::Text(self.date.format(DATE_FORMAT).to_string()),
            OrderField::CustomerName => (&self.customer_name).into(),
            OrderField::PainterName => (&self.painter_name).into(),
            OrderField::Amount => self.amount.into(),
            OrderField::Status => self.status.as_str().into(),
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.record.date)
    }
}

/// Columns shared by the orders screen and the orders report.
#[must_use]
pub fn order_columns() -> Vec<Column<Stored<Order>>> {
    vec![
        Column::new(OrderField::OrderId, "Order ID"),
        Column::new(OrderField::Date, "Date"),
        Column::new(OrderField::CustomerName, "Customer"),
        Column::new(OrderField::PainterName, "Painter"),
        Column::new(OrderField::Amount, "Amount"),
        Column::new(OrderField::Status, "Status"),
    ]
}

#[must_use]
pub fn orders_screen() -> ListScreen<Stored<Order>> {
    ListScreen {
        title: "Orders",
        add_action: Some(AddAction {
            label: "Add New Order",
            command: "order_add",
        }),
        columns: order_columns(),
        search_fields: vec![
            OrderField::OrderId,
            OrderField::Date,
            OrderField::CustomerName,
            OrderField::PainterName,
            OrderField::Status,
        ],
    }
}

/// The new-order form. The painter select offers the current painters.
#[must_use]
pub fn order_form(painters: &[Stored<Painter>]) -> CreateForm {
    let mut painter_options = vec![SelectOption {
        label: "Select Painter".to_string(),
        value: String::new(),
    }];
    painter_options.extend(painters.iter().map(|p| SelectOption::same(&p.name)));

    let status_options = OrderStatus::ALL
        .iter()
        .map(|s| SelectOption::same(s.as_str()))
        .collect();

    CreateForm::new(
        "Add New Order",
        vec![
            FormField::new("Order ID", "orderId", FieldType::Text)
                .placeholder("e.g., ORD-2024-001")
                .required(),
            FormField::new("Date", "date", FieldType::Date).required(),
            FormField::new("Customer Name", "customerName", FieldType::Text)
                .placeholder("Enter customer name")
                .required(),
            FormField::new("Painter Name", "painterName", FieldType::Select(painter_options))
                .required(),
            FormField::new("Amount ($)", "amount", FieldType::Number)
                .placeholder("Enter order amount")
                .required(),
            FormField::new("Status", "status", FieldType::Select(status_options)).required(),
        ],
    )
}

impl FromForm for Order {
    fn from_form(values: &FormValues) -> Result<Self> {
        let raw_date = values.required_text("date", "Date")?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT).map_err(|_| {
            ValidationErrors::single("date", "Date must be a valid date (YYYY-MM-DD)")
        })?;

        let raw_status = values.required_text("status", "Status")?;
        let status = OrderStatus::parse(&raw_status).ok_or_else(|| {
            ValidationErrors::single("status", "Status must be Pending, Mixing or Completed")
        })?;

        Ok(Self {
            order_id: values.required_text("orderId", "Order ID")?,
            date,
            customer_name: values.required_text("customerName", "Customer Name")?,
            painter_name: values.required_text("painterName", "Painter Name")?,
            amount: values.number("amount"),
            status,
        })
    }
}

// --- Customers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Contact,
    MobileNo,
}

impl ColumnKey for CustomerField {}

impl Row for Stored<Customer> {
    type Field = CustomerField;

    fn value(&self, field: CustomerField) -> Value {
        match field {
            CustomerField::Name => (&self.name).into(),
            CustomerField::Contact => (&self.contact).into(),
            CustomerField::MobileNo => (&self.mobile_no).into(),
        }
    }
}

#[must_use]
pub fn customers_screen() -> ListScreen<Stored<Customer>> {
    ListScreen {
        title: "Customers",
        add_action: Some(AddAction {
            label: "Add New Customer",
            command: "customer_add",
        }),
        columns: vec![
            Column::new(CustomerField::Name, "Name"),
            Column::new(CustomerField::Contact, "Contact"),
            Column::new(CustomerField::MobileNo, "Mobile No."),
        ],
        search_fields: vec![
            CustomerField::Name,
            CustomerField::Contact,
            CustomerField::MobileNo,
        ],
    }
}

#[must_use]
pub fn customer_form() -> CreateForm {
    CreateForm::new(
        "Add New Customer",
        vec![
            FormField::new("Name", "name", FieldType::Text)
                .placeholder("Enter full name")
                .required(),
            FormField::new("Contact", "contact", FieldType::Text)
                .placeholder("Enter email or address")
                .required(),
            FormField::new("Mobile No.", "mobileNo", FieldType::Tel)
                .placeholder("Enter mobile number")
                .required(),
        ],
    )
}

impl FromForm for Customer {
    fn from_form(values: &FormValues) -> Result<Self> {
        Ok(Self {
            name: values.required_text("name", "Name")?,
            contact: values.required_text("contact", "Contact")?,
            mobile_no: values.required_text("mobileNo", "Mobile No.")?,
        })
    }
}

// --- Painters ---

/// Columns shared by the painters screen and the commission report.
#[must_use]
pub fn painter_columns() -> Vec<Column<PainterRow>> {
    vec![
        Column::new(PainterField::Name, "Name"),
        Column::new(PainterField::Contact, "Contact"),
        Column::new(PainterField::TotalCommissions, "Total Commissions"),
    ]
}

#[must_use]
pub fn painters_screen() -> ListScreen<PainterRow> {
    ListScreen {
        title: "Painters",
        add_action: Some(AddAction {
            label: "Add New Painter",
            command: "painter_add",
        }),
        columns: painter_columns(),
        search_fields: vec![PainterField::Name, PainterField::Contact],
    }
}

#[must_use]
pub fn painter_form() -> CreateForm {
    CreateForm::new(
        "Add New Painter",
        vec![
            FormField::new("Name", "name", FieldType::Text)
                .placeholder("Enter full name")
                .required(),
            FormField::new("Contact", "contact", FieldType::Text)
                .placeholder("Enter phone or email")
                .required(),
        ],
    )
}

impl FromForm for Painter {
    fn from_form(values: &FormValues) -> Result<Self> {
        Ok(Self {
            name: values.required_text("name", "Name")?,
            contact: values.required_text("contact", "Contact")?,
        })
    }
}

// --- Stock ---

/// Columns shared by the stock screen and the inventory report.
#[must_use]
pub fn stock_columns() -> Vec<Column<StockRow>> {
    vec![
        Column::new(StockField::ProductName, "Product Name"),
        Column::new(StockField::Color, "Color"),
        Column::new(StockField::Quantity, "Quantity"),
        Column::new(StockField::Status, "Status"),
    ]
}

#[must_use]
pub fn stock_screen() -> ListScreen<StockRow> {
    ListScreen {
        title: "Stock",
        add_action: Some(AddAction {
            label: "Add New Stock",
            command: "stock_add",
        }),
        columns: stock_columns(),
        search_fields: vec![StockField::ProductName, StockField::Color, StockField::Status],
    }
}

#[must_use]
pub fn stock_form() -> CreateForm {
    CreateForm::new(
        "Add New Stock Item",
        vec![
            FormField::new("Product Name", "productName", FieldType::Text)
                .placeholder("e.g., Premium Enamel")
                .required(),
            FormField::new("Color", "color", FieldType::Text)
                .placeholder("e.g., Crimson Red")
                .required(),
            FormField::new("Quantity", "quantity", FieldType::Number)
                .placeholder("Enter number of units")
                .required(),
        ],
    )
}

impl FromForm for Stock {
    fn from_form(values: &FormValues) -> Result<Self> {
        let quantity = values.number("quantity");
        if quantity < 0.0 || quantity.fract() > 0.0 || quantity > f64::from(u32::MAX) {
            return Err(ValidationErrors::single(
                "quantity",
                "Quantity must be a whole number of zero or more",
            )
            .into());
        }

        // Cast safety: checked above to be a whole number within u32 range.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantity = quantity as u32;

        Ok(Self {
            product_name: values.required_text("productName", "Product Name")?,
            color: values.required_text("color", "Color")?,
            quantity,
        })
    }
}

// --- Color mixing ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixField {
    MixName,
    HexCode,
    BaseColors,
    Ratios,
    Quantity,
    Preview,
}

impl ColumnKey for MixField {
    fn cell_kind(self) -> CellKind {
        match self {
            Self::Preview => CellKind::ColorPreview,
            Self::MixName | Self::HexCode | Self::BaseColors | Self::Ratios | Self::Quantity => {
                CellKind::Plain
            }
        }
    }
}

impl Row for Stored<ColorMixing> {
    type Field = MixField;

    fn value(&self, field: MixField) -> Value {
        match field {
            MixField::MixName => (&self.mix_name).into(),
            MixField::HexCode => (&self.hex_code).into(),
            MixField::BaseColors => Value::List(self.base_colors.clone()),
            MixField::Ratios => Value::List(self.ratios.iter().map(ToString::to_string).collect()),
            MixField::Quantity => self.quantity.into(),
            MixField::Preview => Value::Missing,
        }
    }

    fn hex_code(&self) -> Option<&str> {
        Some(self.record.hex_code.as_str())
    }
}

/// Columns shared by the mixing screen and the mixing report.
#[must_use]
pub fn mixing_columns() -> Vec<Column<Stored<ColorMixing>>> {
    vec![
        Column::new(MixField::MixName, "Mix Name"),
        Column::new(MixField::HexCode, "Hex Code"),
        Column::new(MixField::BaseColors, "Base Colors"),
        Column::new(MixField::Ratios, "Ratios"),
        Column::new(MixField::Quantity, "Quantity (L)"),
        Column::new(MixField::Preview, "Preview"),
    ]
}

#[must_use]
pub fn mixing_screen() -> ListScreen<Stored<ColorMixing>> {
    ListScreen {
        title: "Color Mixing",
        add_action: Some(AddAction {
            label: "Log New Mix",
            command: "mix_add",
        }),
        columns: mixing_columns(),
        search_fields: vec![MixField::MixName, MixField::HexCode, MixField::BaseColors],
    }
}

#[must_use]
pub fn mixing_form() -> CreateForm {
    CreateForm::new(
        "Log New Color Mix",
        vec![
            FormField::new("Mix Name", "mixName", FieldType::Text)
                .placeholder("e.g., Navy Blue Special")
                .required(),
            FormField::new("Hex Code", "hexCode", FieldType::Text)
                .placeholder("e.g., #000080")
                .required(),
            FormField::new("Base Colors", "baseColors", FieldType::CommaList)
                .placeholder("e.g., Blue, Black, White")
                .required(),
            FormField::new("Mixing Ratios", "ratios", FieldType::NumberList)
                .placeholder("e.g., 50, 40, 10")
                .required(),
            FormField::new("Quantity (liters)", "quantity", FieldType::Number)
                .placeholder("e.g., 2.5")
                .required(),
        ],
    )
}

impl FromForm for ColorMixing {
    fn from_form(values: &FormValues) -> Result<Self> {
        Ok(Self {
            mix_name: values.required_text("mixName", "Mix Name")?,
            hex_code: values.required_text("hexCode", "Hex Code")?,
            base_colors: values.list("baseColors"),
            ratios: values.numbers("ratios"),
            quantity: values.number("quantity"),
        })
    }
}
