use crate::classifier::{CategoryKeywords, ClassifierConfig, Override};

pub const DEFAULT_CATEGORY: &str = "Без категории";

// Declaration order is match priority.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Продукты",
        &[
            "продукты", "еда", "магазин", "супермаркет", "пятерочка", "магнит", "перекресток",
            "ашан", "лента", "вкусвилл", "вкусно и точка", "ростикс", "мартирос", "обед", "ужин",
            "завтрак", "перекус", "кофе", "чай", "вода", "шоколад", "фрукты", "овощи", "хлеб",
            "молоко",
        ],
    ),
    (
        "Быт",
        &[
            "квартира", "дом", "ремонт", "мебель", "техника", "посуда", "химия", "уборка", "жкх",
            "интернет", "связь", "симк", "впн", "vpn", "счета", "коммуналка", "квартплата",
            "аренда", "бытовая", "порошок", "мыло", "шампунь", "полотенца", "постельное",
        ],
    ),
    (
        "Транспорт",
        &[
            "такси", "метро", "автобус", "маршрутка", "электричка", "каршеринг", "самокат",
            "велосипед", "проезд", "билет", "бензин", "парковка", "яндекс", "убер", "дорог",
        ],
    ),
    (
        "Здоровье",
        &[
            "лекарства", "врач", "аптека", "медицина", "больница", "анализы", "стоматолог",
            "окулист", "витамины", "массаж", "спорт", "фитнес", "тренировка", "бассейн",
            "стрижка",
        ],
    ),
    (
        "Одежда",
        &[
            "одежда", "обувь", "куртка", "брюки", "рубашка", "платье", "кроссовки", "зара",
            "юникло", "спортмастер", "остин", "носки", "белье", "шапка", "перчатки", "сумка",
        ],
    ),
    (
        "Развитие",
        &[
            "курсы", "обучение", "книги", "образование", "тренинг", "семинар", "мастер-класс",
            "репетитор", "школа", "институт", "язык", "программа", "подписка", "журнал",
            "вебинар",
        ],
    ),
    (
        "Подарки",
        &[
            "подарок", "сувенир", "праздник", "день рождения", "новый год", "23 февраля", "цветы",
            "открытка", "конфеты", "торт", "украшение", "поздравление", "юбилей", "свадьба",
        ],
    ),
    (
        "Досуг",
        &[
            "кино", "театр", "концерт", "музей", "выставка", "ресторан", "кафе", "бар", "клуб",
            "боулинг", "кальян", "игры", "развлечения", "отдых", "хобби", "путешествия",
        ],
    ),
    (
        "Переводы",
        &[
            "перевод", "сбер", "тинькофф", "альфа", "втб", "карта", "счет", "банк", "кредит",
            "долг", "займ", "вернул", "отдал", "комиссия", "проценты", "ипотека",
        ],
    ),
];

/// The stock Russian table with the holiday override in front of it.
pub fn default_config() -> ClassifierConfig {
    ClassifierConfig {
        default_category: DEFAULT_CATEGORY.to_string(),
        overrides: vec![Override {
            phrase: "8 марта".to_string(),
            category: "Подарки".to_string(),
        }],
        categories: CATEGORY_KEYWORDS
            .iter()
            .map(|(name, keywords)| CategoryKeywords {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect(),
    }
}
