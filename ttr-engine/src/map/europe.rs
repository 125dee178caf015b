use lazy_static::lazy_static;

use crate::{
    rand::Rand,
    trains::{Colour, RouteColour},
    Ticket,
};

use super::{Board, Map};

macro_rules! cities {
    ($($id:expr => $name:ident ,)*) => {
        lazy_static! {
            static ref CITIES: Vec<(u32, &'static str)> = {
                vec![
                    $(($id, stringify!($name)),)*
                ]
            };
        }
    }
}

cities! {
    0 => Amsterdam,
    1 => Angora,
    2 => Athina,
    3 => Barcelona,
    4 => Berlin,
    5 => Brest,
    6 => Brindisi,
    7 => Bruxelles,
    8 => Bucuresti,
    9 => Budapest,
    10 => Cadiz,
    11 => Constantinople,
    12 => Danzic,
    13 => Dieppe,
    14 => Edinburgh,
    15 => Erzurum,
    16 => Essen,
    17 => Frankfurt,
    18 => Kharkov,
    19 => Kobenhavn,
    20 => Kyiv,
    21 => Lisboa,
    22 => London,
    23 => Madrid,
    24 => Marseille,
    25 => Moskva,
    26 => Munchen,
    27 => Palermo,
    28 => Pamplona,
    29 => Paris,
    30 => Petrograd,
    31 => Riga,
    32 => Roma,
    33 => Rostov,
    34 => Sarajevo,
    35 => Sevastopol,
    36 => Smolensk,
    37 => Smyrna,
    38 => Sochi,
    39 => Sofia,
    40 => Stockholm,
    41 => Venezia,
    42 => Warszawa,
    43 => Wien,
    44 => Wilno,
    45 => Zagreb,
    46 => Zurich,
}

macro_rules! colour {
    (Grey) => {
        RouteColour::Grey
    };
    ($c:ident) => {
        RouteColour::Colour(Colour::$c)
    };
}

macro_rules! routes {
    ($($c0:ident $c1:ident : $len:literal $col:ident ,)*) => {
        lazy_static! {
            static ref BOARD: Board = {
                let mut board = Board::new();
                for (_, name) in CITIES.iter() {
                    board.add_city(name);
                }
                $(
                    board
                        .add_route(stringify!($c0), stringify!($c1), $len, colour!($col))
                        .unwrap();
                )*
                board
            };
        }
    };
}

routes! {
    Edinburgh London : 4 Black,
    Edinburgh London : 4 Orange,
    London Dieppe : 2 Grey,
    London Dieppe : 2 Grey,
    London Amsterdam : 2 Grey,
    Amsterdam Bruxelles : 1 Black,
    Amsterdam Essen : 3 Yellow,
    Amsterdam Frankfurt : 2 White,
    Bruxelles Dieppe : 2 Green,
    Bruxelles Paris : 2 Yellow,
    Bruxelles Paris : 2 Red,
    Bruxelles Frankfurt : 2 Blue,
    Brest Dieppe : 2 Orange,
    Brest Paris : 3 Black,
    Brest Pamplona : 4 Pink,
    Dieppe Paris : 1 Pink,
    Paris Frankfurt : 3 White,
    Paris Frankfurt : 3 Orange,
    Paris Zurich : 3 Grey,
    Paris Marseille : 4 Grey,
    Paris Pamplona : 4 Blue,
    Paris Pamplona : 4 Green,
    Pamplona Madrid : 3 Black,
    Pamplona Madrid : 3 White,
    Pamplona Barcelona : 2 Grey,
    Pamplona Marseille : 4 Red,
    Madrid Lisboa : 3 Pink,
    Madrid Cadiz : 3 Orange,
    Madrid Barcelona : 2 Yellow,
    Lisboa Cadiz : 2 Blue,
    Barcelona Marseille : 4 Grey,
    Marseille Zurich : 2 Pink,
    Marseille Roma : 4 Grey,
    Zurich Munchen : 2 Yellow,
    Zurich Venezia : 2 Green,
    Frankfurt Essen : 2 Green,
    Frankfurt Berlin : 3 Black,
    Frankfurt Berlin : 3 Red,
    Frankfurt Munchen : 2 Pink,
    Essen Berlin : 2 Blue,
    Essen Kobenhavn : 3 Grey,
    Essen Kobenhavn : 3 Grey,
    Kobenhavn Stockholm : 3 Yellow,
    Kobenhavn Stockholm : 3 White,
    Stockholm Petrograd : 8 Grey,
    Berlin Danzic : 4 Grey,
    Berlin Warszawa : 4 Pink,
    Berlin Warszawa : 4 Yellow,
    Berlin Wien : 3 Green,
    Munchen Wien : 3 Orange,
    Munchen Venezia : 2 Blue,
    Venezia Roma : 2 Black,
    Venezia Zagreb : 2 Grey,
    Roma Brindisi : 2 White,
    Roma Palermo : 4 Grey,
    Brindisi Palermo : 3 Grey,
    Brindisi Athina : 4 Grey,
    Palermo Smyrna : 6 Grey,
    Wien Budapest : 1 Red,
    Wien Budapest : 1 White,
    Wien Zagreb : 2 Grey,
    Wien Warszawa : 4 Blue,
    Zagreb Budapest : 2 Orange,
    Zagreb Sarajevo : 3 Red,
    Budapest Sarajevo : 3 Pink,
    Budapest Bucuresti : 4 Grey,
    Budapest Kyiv : 6 Grey,
    Sarajevo Sofia : 2 Grey,
    Sarajevo Athina : 4 Green,
    Sofia Athina : 3 Pink,
    Sofia Bucuresti : 2 Grey,
    Sofia Constantinople : 3 Blue,
    Athina Smyrna : 2 Grey,
    Smyrna Constantinople : 2 Grey,
    Smyrna Angora : 3 Orange,
    Constantinople Angora : 2 Grey,
    Constantinople Bucuresti : 3 Yellow,
    Constantinople Sevastopol : 4 Grey,
    Angora Erzurum : 3 Black,
    Erzurum Sochi : 3 Red,
    Erzurum Sevastopol : 4 Grey,
    Bucuresti Sevastopol : 4 White,
    Bucuresti Kyiv : 4 Grey,
    Sevastopol Sochi : 2 Grey,
    Sevastopol Rostov : 4 Grey,
    Sochi Rostov : 2 Grey,
    Rostov Kharkov : 2 Green,
    Kharkov Kyiv : 4 Grey,
    Kharkov Moskva : 4 Grey,
    Kyiv Warszawa : 4 Grey,
    Kyiv Wilno : 2 Grey,
    Kyiv Smolensk : 3 Red,
    Moskva Smolensk : 2 Orange,
    Moskva Petrograd : 4 White,
    Smolensk Wilno : 3 Yellow,
    Wilno Petrograd : 4 Blue,
    Wilno Riga : 4 Green,
    Wilno Warszawa : 3 Red,
    Warszawa Danzic : 2 Grey,
    Danzic Riga : 3 Black,
    Riga Petrograd : 4 Grey,
}

macro_rules! tickets {
    ($($id:expr => $c0:ident $c1:ident : $val:expr ,)*) => {
        lazy_static! {
            static ref TICKETS: Vec<Ticket> = {
                let find = |name| BOARD.city(name).unwrap();
                vec![
                    $(Ticket {
                        id: $id,
                        city0: find(stringify!($c0)),
                        city1: find(stringify!($c1)),
                        value: $val,
                        completed: false,
                    },)*
                ]
            };
        }
    };
}

tickets! {
    0 => Amsterdam Pamplona : 7,
    1 => Amsterdam Wilno : 12,
    2 => Angora Kharkov : 10,
    3 => Athina Angora : 5,
    4 => Athina Wilno : 11,
    5 => Barcelona Bruxelles : 8,
    6 => Barcelona Munchen : 8,
    7 => Berlin Bucuresti : 8,
    8 => Berlin Moskva : 12,
    9 => Berlin Roma : 9,
    10 => Brest Marseille : 7,
    11 => Brest Petrograd : 20,
    12 => Brest Venezia : 8,
    13 => Bruxelles Danzic : 9,
    14 => Budapest Sofia : 5,
    15 => Cadiz Stockholm : 21,
    16 => Edinburgh Athina : 21,
    17 => Edinburgh Paris : 7,
    18 => Essen Kyiv : 10,
    19 => Frankfurt Kobenhavn : 5,
    20 => Frankfurt Smolensk : 13,
    21 => Kobenhavn Erzurum : 21,
    22 => Kyiv Petrograd : 6,
    23 => Kyiv Sochi : 8,
    24 => Lisboa Danzic : 20,
    25 => London Berlin : 7,
    26 => London Wien : 10,
    27 => Madrid Dieppe : 8,
    28 => Madrid Zurich : 8,
    29 => Marseille Essen : 8,
    30 => Palermo Constantinople : 8,
    31 => Palermo Moskva : 20,
    32 => Paris Wien : 8,
    33 => Paris Zagreb : 7,
    34 => Riga Bucuresti : 10,
    35 => Roma Smyrna : 8,
    36 => Rostov Erzurum : 5,
    37 => Sarajevo Sevastopol : 8,
    38 => Smolensk Rostov : 8,
    39 => Sofia Smyrna : 5,
    40 => Stockholm Wien : 11,
    41 => Venezia Constantinople : 10,
    42 => Warszawa Smolensk : 6,
    43 => Zagreb Brindisi : 6,
    44 => Zurich Brindisi : 6,
    45 => Zurich Budapest : 6,
}

pub struct Europe {
    smalls: Vec<Ticket>,
    bigs: Vec<Ticket>,
}

impl Map for Europe {
    fn new(rand: &mut Rand) -> Self {
        let (bigs, smalls): (Vec<_>, Vec<_>) =
            TICKETS.iter().copied().partition(|t| t.value >= 20);
        let bigs = rand.shuffle(bigs);
        let smalls = rand.shuffle(smalls);

        Europe { smalls, bigs }
    }

    fn board(&self) -> Board {
        BOARD.clone()
    }

    fn initial_tickets(&mut self, players: u32) -> Vec<Vec<Ticket>> {
        (0..players)
            .map(|_| {
                let take = self.smalls.len().min(3);
                let big = if self.bigs.is_empty() {
                    None
                } else {
                    Some(self.bigs.remove(0))
                };
                self.smalls.drain(0..take).chain(big).collect()
            })
            .collect()
    }

    fn draw_ticket(&mut self) -> Option<Ticket> {
        if self.smalls.is_empty() {
            None
        } else {
            Some(self.smalls.remove(0))
        }
    }

    fn return_tickets(&mut self, tickets: Vec<Ticket>) {
        self.smalls.extend(tickets);
    }
}
