//! Fixed tables of the ISU timetable.

use chrono_tz::Tz;

/// Zone the timetable is published in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Yekaterinburg;

/// Weekday names as they appear in day-header rows, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

/// Start times of the ten lesson slots. A lesson's ordinal is its 1-based
/// position in this list.
pub const LESSON_SLOTS: [&str; 10] = [
    "08:00", "09:35", "11:35", "13:10", "15:10", "16:45", "18:20", "19:55", "21:25", "22:55",
];

/// Google Calendar color ids per lesson type.
pub const LESSON_COLORS: &[(&str, &str)] = &[
    ("Лекция", "3"),
    ("Практика (семинар)", "6"),
    ("Лабораторная работа", "9"),
    ("Физвоспитание", "2"),
    ("Военная подготовка", "10"),
    ("Лекция + практика", "4"),
    ("Консультация", "7"),
    ("Экзамен", "11"),
    ("Консультация экзамена", "11"),
    ("Ликвидация задолженостей", "11"),
    ("Зачёт с оценкой", "11"),
    ("Зачёт", "11"),
    ("Защита (Курсовой/РГР/Лабораторной)", "11"),
    ("Лекция + практика + лабораторная работа", "1"),
    ("Мероприятие", "5"),
    ("Кураторский час", "5"),
    ("Прочее", "8"),
];
