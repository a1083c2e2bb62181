#![allow(dead_code)]

use traverse::{traverse_enum, traverse_record, traverse_variant};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Color {
    #[default]
    Red,
    Blue,
}

traverse_enum!(Color: u32 { Red, Blue });

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    HulkSmash,
}

traverse_enum!(Mood: u8 { Happy, Sad, HulkSmash });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

traverse_record!(Point { x, y });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub color: Color,
    pub mood: Mood,
    pub name: String,
    pub points: Vec<Point>,
}

traverse_record!(Polygon { color, mood, name, points });

pub fn ufo() -> Polygon {
    Polygon {
        color: Color::Blue,
        mood: Mood::HulkSmash,
        name: "UFO\"1942\"".to_string(),
        points: vec![
            Point { x: 3, y: 5 },
            Point { x: 4, y: 6 },
            Point { x: 5, y: 7 },
        ],
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Move {
    pub speed: i32,
    pub turn: i32,
}

traverse_record!(Move { speed, turn });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Create {
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

traverse_record!(Create { id, x, y });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quit {
    pub time: i32,
}

traverse_record!(Quit { time });

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Create(Create),
    Move(Move),
    Quit(Quit),
}

traverse_variant!(Message { Create(Create), Move(Move), Quit(Quit) });

pub fn queue() -> Vec<Message> {
    vec![
        Message::Move(Move { speed: 1, turn: 2 }),
        Message::Create(Create { id: 42, x: -10, y: -10 }),
        Message::Quit(Quit { time: 100 }),
    ]
}
